use crate::escape::Escape;
use serde_json::{Map, Value};
use std::fmt::{Arguments, Display, Result, Write};

/// Wraps some underlying buffer by providing methods that write to it
/// in different formats.
pub struct Pipe<'buffer> {
    buffer: &'buffer mut (dyn Write + 'buffer),
}

impl<'buffer> Pipe<'buffer> {
    /// Create a new Pipe that writes to the given buffer.
    pub fn new(buffer: &'buffer mut String) -> Self {
        Self { buffer }
    }

    /// Write the given Value to the Pipe buffer.
    ///
    /// The Pipe will handle formatting the value. Null is written as
    /// nothing at all, so a missing optional field renders empty.
    ///
    /// # Errors
    ///
    /// The Pipe supports all Value types, so the only error that will
    /// be returned is propagated from the [write!] macro itself.
    pub fn write_value(&mut self, value: &Value) -> Result {
        match value {
            Value::Null => Ok(()),
            Value::String(string) => self.write_str(string),
            Value::Array(array) => self.write_array(array),
            Value::Object(object) => self.write_object(object),
            _ => self.write_display(value),
        }
    }

    /// Write the given Value after passing its text through the escaper.
    pub fn write_escaped(&mut self, value: &Value, escaper: &dyn Escape) -> Result {
        let text = to_text(value);
        self.write_str(&escaper.escape(&text))
    }

    /// Write the value to the buffer using the Display implementation.
    fn write_display(&mut self, value: impl Display) -> Result {
        write!(self.buffer, "{}", value)
    }

    /// Write the value to the buffer as a comma separated list and
    /// surrounded by brackets.
    fn write_array(&mut self, value: &[Value]) -> Result {
        write!(self.buffer, "[")?;
        let mut iter = value.iter();
        if let Some(item) = iter.next() {
            self.write_value(item)?;
            for item in iter {
                write!(self.buffer, ", ")?;
                self.write_value(item)?;
            }
        }
        write!(self.buffer, "]")
    }

    /// Write the value to the buffer as key/value pairs and surrounded
    /// by curly braces.
    fn write_object(&mut self, value: &Map<String, Value>) -> Result {
        write!(self.buffer, "{{")?;
        let mut iter = value.iter();
        if let Some((key, value)) = iter.next() {
            write!(self.buffer, "{}: ", key)?;
            self.write_value(value)?;
            for (key, value) in iter {
                write!(self.buffer, ", {}: ", key)?;
                self.write_value(value)?;
            }
        }
        write!(self.buffer, "}}")
    }
}

impl Write for Pipe<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result {
        Write::write_str(self.buffer, s)
    }

    #[inline]
    fn write_char(&mut self, c: char) -> Result {
        Write::write_char(self.buffer, c)
    }

    #[inline]
    fn write_fmt(&mut self, args: Arguments<'_>) -> Result {
        Write::write_fmt(self.buffer, args)
    }
}

/// Return the text a [`Value`] renders as.
pub fn to_text(value: &Value) -> String {
    if let Value::String(string) = value {
        return string.clone();
    }
    let mut buffer = String::new();
    // Writing into a String cannot fail.
    let _ = Pipe::new(&mut buffer).write_value(value);

    buffer
}

#[cfg(test)]
mod tests {
    use super::{to_text, Pipe};
    use crate::escape::HtmlEscape;
    use serde_json::json;
    use std::fmt::Write;

    #[test]
    fn test_to_text_scalars() {
        assert_eq!(to_text(&json!("Ada")), "Ada");
        assert_eq!(to_text(&json!(30)), "30");
        assert_eq!(to_text(&json!(1.5)), "1.5");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&json!(null)), "");
    }

    #[test]
    fn test_to_text_containers() {
        assert_eq!(to_text(&json!([])), "[]");
        assert_eq!(to_text(&json!({})), "{}");
        assert_eq!(to_text(&json!([1, "two", 3])), "[1, two, 3]");
        assert_eq!(to_text(&json!({ "a": 1, "b": 2 })), "{a: 1, b: 2}");
    }

    #[test]
    fn test_write_escaped() {
        let mut buffer = String::new();
        let mut pipe = Pipe::new(&mut buffer);
        pipe.write_str("<p>").unwrap();
        pipe.write_escaped(&json!("<b>&</b>"), &HtmlEscape).unwrap();
        pipe.write_str("</p>").unwrap();

        assert_eq!(buffer, "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
    }
}
