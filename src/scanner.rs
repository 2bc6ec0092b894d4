use memchr::memchr;

/// Parse-state frame. The scanner maintains a stack of these; the top frame
/// describes what kind of construct the cursor is currently inside, and the
/// stack read bottom-to-top is the nesting path from the root to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Frame {
    /// Inside an object, expecting a key or `}`.
    Object,
    /// Object key finished, expecting `:`.
    ObjectKey,
    /// Inside an object key's string literal.
    ObjectKeyString,
    /// Expecting an object value (after `:`).
    ObjectValue,
    /// Inside an object value's string literal.
    ObjectValueString,
    /// A key/value pair just finished, expecting `,` or `}`.
    ObjectValueDone,
    /// Inside an array, below the implicit value slot.
    Array,
    /// Expecting or inside a non-string array element.
    ArrayValue,
    /// Inside an array element's string literal.
    ArrayValueString,
    /// An array element just finished, expecting `,` or `]`.
    ArrayValueDone,
}

impl Frame {
    #[inline]
    pub(crate) fn in_string(self) -> bool {
        matches!(
            self,
            Frame::ObjectKeyString | Frame::ObjectValueString | Frame::ArrayValueString
        )
    }
}

/// Walk `input` from byte offset `from`, mutating `stack` in place.
///
/// Total over all inputs: unrecognized bytes outside string literals drive no
/// transition and are skipped. All structural characters are ASCII, so the
/// walk is byte-wise and never splits a UTF-8 sequence. `from` must lie on a
/// char boundary that the previous call stopped at (0 for a fresh scan).
pub(crate) fn scan_into(input: &str, from: usize, stack: &mut Vec<Frame>) {
    let bytes = input.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if stack.last().is_some_and(|f| f.in_string()) {
            // Inside a string literal only an unescaped quote matters.
            let Some(off) = memchr(b'"', &bytes[i..]) else {
                break;
            };
            let q = i + off;
            if !is_escaped(bytes, q) {
                handle_quote(stack);
            }
            i = q + 1;
            continue;
        }
        match bytes[i] {
            b'"' => {
                if !is_escaped(bytes, i) {
                    handle_quote(stack);
                }
            }
            b'{' => handle_open_brace(stack),
            b'[' => handle_open_bracket(stack),
            b':' => handle_colon(stack),
            b',' => handle_comma(stack),
            b'}' => handle_close_brace(stack),
            b']' => handle_close_bracket(stack),
            // Whitespace, literal/number bytes, and garbage drive no
            // transition.
            _ => {}
        }
        i += 1;
    }
}

/// Scan a whole string and return the final frame stack.
pub(crate) fn scan(input: &str) -> Vec<Frame> {
    let mut stack = Vec::new();
    scan_into(input, 0, &mut stack);
    stack
}

/// A quote is escaped iff it is preceded by an odd-length run of backslashes.
#[inline]
fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    let mut backslashes = 0usize;
    while backslashes < pos && bytes[pos - 1 - backslashes] == b'\\' {
        backslashes += 1;
    }
    backslashes % 2 == 1
}

fn handle_quote(stack: &mut Vec<Frame>) {
    match stack.last() {
        Some(Frame::ObjectValueString) => {
            stack.pop();
            stack.push(Frame::ObjectValueDone);
        }
        Some(Frame::ArrayValueString) => {
            stack.pop();
            stack.push(Frame::ArrayValueDone);
        }
        Some(Frame::ObjectKeyString) => {
            stack.pop();
            stack.push(Frame::ObjectKey);
        }
        Some(Frame::ObjectValue) => stack.push(Frame::ObjectValueString),
        Some(Frame::ArrayValue) => stack.push(Frame::ArrayValueString),
        Some(Frame::Object) => stack.push(Frame::ObjectKeyString),
        // A quote at the root or in any other position is inert.
        _ => {}
    }
}

fn handle_open_brace(stack: &mut Vec<Frame>) {
    match stack.last() {
        None | Some(Frame::ObjectValue) | Some(Frame::ArrayValue) | Some(Frame::Array) => {
            stack.push(Frame::Object);
        }
        _ => {}
    }
}

fn handle_open_bracket(stack: &mut Vec<Frame>) {
    match stack.last() {
        None | Some(Frame::ObjectValue) | Some(Frame::ArrayValue) | Some(Frame::Array) => {
            // An array always carries an implicit "expecting a value" slot.
            stack.push(Frame::Array);
            stack.push(Frame::ArrayValue);
        }
        _ => {}
    }
}

fn handle_colon(stack: &mut Vec<Frame>) {
    if stack.last() == Some(&Frame::ObjectKey) {
        stack.pop();
        stack.push(Frame::ObjectValue);
    }
}

fn handle_comma(stack: &mut Vec<Frame>) {
    match stack.last() {
        // A non-string object value ended; back to expecting a key.
        Some(Frame::ObjectValue) => {
            stack.pop();
        }
        // Drop both the done marker and the value slot under it.
        Some(Frame::ObjectValueDone) => {
            stack.pop();
            stack.pop();
        }
        // Still expecting a value in the array.
        Some(Frame::ArrayValue) => {}
        // Back to the implicit value slot.
        Some(Frame::ArrayValueDone) => {
            stack.pop();
        }
        _ => {}
    }
}

fn handle_close_brace(stack: &mut Vec<Frame>) {
    match stack.last() {
        Some(Frame::Object) => {
            stack.pop();
        }
        Some(Frame::ObjectValue) => {
            stack.pop();
            stack.pop();
        }
        Some(Frame::ObjectValueDone) => {
            stack.pop();
            stack.pop();
            stack.pop();
        }
        _ => return,
    }
    notify_parent(stack);
}

fn handle_close_bracket(stack: &mut Vec<Frame>) {
    match stack.last() {
        Some(Frame::Array) => {
            stack.pop();
        }
        Some(Frame::ArrayValue) => {
            stack.pop();
            stack.pop();
        }
        Some(Frame::ArrayValueDone) => {
            stack.pop();
            stack.pop();
            stack.pop();
        }
        _ => return,
    }
    notify_parent(stack);
}

/// The just-closed container may itself be a value of its parent container.
fn notify_parent(stack: &mut Vec<Frame>) {
    match stack.last() {
        Some(Frame::ObjectValue) => stack.push(Frame::ObjectValueDone),
        Some(Frame::ArrayValue) => stack.push(Frame::ArrayValueDone),
        _ => {}
    }
}
