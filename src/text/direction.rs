//! Direction context tracking for nested elements
//!
//! [`DirectionContext`] is the BiDi state machine the segment parser drives
//! while walking the tag stream. It tracks the effective writing direction
//! from `dir` attributes, the first-strong auto-detection of `<bdi>`, and
//! the nesting depth of `<bdi>` isolation and `<bdo>` override scopes.
//!
//! Entering an element pushes the previous direction so that exiting can
//! restore it; two parallel bool stacks remember whether each level was a
//! `<bdi>` or `<bdo>` so the depth counters stay balanced even when the
//! element carries other attributes.

use crate::text::unicode::{
  detect_direction_from_text, parse_direction_attribute, WritingDirection,
};

/// Tracks the effective writing direction while parsing nested elements.
///
/// The initial state is `Natural` direction with empty stacks and zero
/// depths. The context never fails: exiting with an empty stack is a no-op,
/// which is the desired behavior for malformed markup with stray close tags.
#[derive(Debug, Clone, Default)]
pub struct DirectionContext {
  current_direction: WritingDirection,
  direction_stack: Vec<WritingDirection>,
  is_bdi_stack: Vec<bool>,
  is_bdo_stack: Vec<bool>,
  isolation_depth: u32,
  override_depth: u32,
}

impl DirectionContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Enters an element, updating the direction context.
  ///
  /// `tag` must already be ASCII-lowercased. `dir_attr` is the raw value of
  /// the element's `dir` attribute ("" when absent). `text_content` is the
  /// look-ahead text used to resolve `dir="auto"` and bare `<bdi>`; when it
  /// is empty the current direction is kept.
  pub fn enter_element(&mut self, tag: &str, dir_attr: &str, text_content: &str) {
    self.direction_stack.push(self.current_direction);

    let is_bdi = tag == "bdi";
    let is_bdo = tag == "bdo";
    self.is_bdi_stack.push(is_bdi);
    self.is_bdo_stack.push(is_bdo);
    if is_bdi {
      self.isolation_depth += 1;
    }
    if is_bdo {
      self.override_depth += 1;
    }

    if !dir_attr.is_empty() {
      match parse_direction_attribute(dir_attr) {
        WritingDirection::RightToLeft => {
          self.current_direction = WritingDirection::RightToLeft;
        }
        WritingDirection::LeftToRight => {
          self.current_direction = WritingDirection::LeftToRight;
        }
        WritingDirection::Natural => {
          // "auto" resolves from the first strong character of the content;
          // any other unrecognized value inherits.
          if dir_attr.eq_ignore_ascii_case("auto") && !text_content.is_empty() {
            self.current_direction = detect_direction_from_text(text_content);
          }
        }
      }
    } else if is_bdi {
      // <bdi> without dir defaults to dir="auto" behavior.
      if !text_content.is_empty() {
        self.current_direction = detect_direction_from_text(text_content);
      }
    }
    // <bdo> without dir has no directional effect; other elements inherit.
  }

  /// Exits an element, restoring the previous direction context.
  ///
  /// No-op when the stack is already empty (stray close tag).
  pub fn exit_element(&mut self) {
    if self.direction_stack.is_empty() {
      return;
    }

    if let Some(was_bdi) = self.is_bdi_stack.pop() {
      if was_bdi {
        self.isolation_depth -= 1;
      }
    }
    if let Some(was_bdo) = self.is_bdo_stack.pop() {
      if was_bdo {
        self.override_depth -= 1;
      }
    }

    if let Some(previous) = self.direction_stack.pop() {
      self.current_direction = previous;
    }
  }

  /// The direction in effect for text emitted right now.
  pub fn effective_direction(&self) -> WritingDirection {
    self.current_direction
  }

  /// True while inside at least one `<bdi>` scope.
  pub fn is_isolated(&self) -> bool {
    self.isolation_depth > 0
  }

  /// True while inside at least one `<bdo>` scope.
  pub fn is_override(&self) -> bool {
    self.override_depth > 0
  }
}
