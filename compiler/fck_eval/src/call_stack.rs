//! Live call stack.
//!
//! Each call pushes a frame holding the callee's display name and the call
//! site. When a fatal error leaves a call, the frames are copied onto the
//! diagnostic as its traceback.

use fck_diagnostic::{Diagnostic, TraceFrame};
use fck_ir::Span;

use crate::errors::illegal_value;

/// One active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: &'static str,
    /// Where the call was made, in the caller's source.
    pub call_span: Span,
}

/// Active calls, outermost first.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` of `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing once the depth limit is reached. The frame is
    /// not pushed on failure.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), Diagnostic> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(illegal_value(
                    frame.call_span,
                    format_args!(
                        "Calling '{}' exceeds the maximum call depth of {max}",
                        frame.name
                    ),
                ));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on an empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot as traceback frames, innermost call first.
    pub fn capture(&self) -> Vec<TraceFrame> {
        self.frames
            .iter()
            .rev()
            .map(|frame| TraceFrame::new(frame.name, frame.call_span))
            .collect()
    }

    /// Attach the current frames to `diagnostic` unless it already has a
    /// traceback from deeper in the stack.
    pub fn attach(&self, diagnostic: Diagnostic) -> Diagnostic {
        if diagnostic.frames.is_empty() && !self.is_empty() {
            diagnostic.with_frames(self.capture())
        } else {
            diagnostic
        }
    }
}
