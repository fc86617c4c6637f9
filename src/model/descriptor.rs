//! Walking JVM method descriptors type by type.
//!
//! Descriptors come from the program model and are not validated up front, so every helper here
//! accepts malformed input and degrades instead of failing: a reference type missing its `;`
//! extends to the end of the parameter list, a descriptor without parentheses has no parameters.

/// Iterates over the parameter types of a method descriptor.
///
/// The parameter list is the text between the first `(` and the last `)`. Each item is a
/// complete field type such as `I`, `[[J` or `Ljava/lang/String;`.
///
/// # Example
///
/// ```rust
/// use softmap::model::DescriptorCursor;
///
/// let params: Vec<_> = DescriptorCursor::new("(I[Ljava/lang/String;J)V").collect();
/// assert_eq!(params, ["I", "[Ljava/lang/String;", "J"]);
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorCursor<'a> {
    params: &'a str,
    position: usize,
}

impl<'a> DescriptorCursor<'a> {
    /// Creates a cursor over the parameters of `desc`.
    #[must_use]
    pub fn new(desc: &'a str) -> Self {
        let params = match (desc.find('('), desc.rfind(')')) {
            (Some(open), Some(close)) if open < close => &desc[open + 1..close],
            _ => "",
        };
        Self {
            params,
            position: 0,
        }
    }

    /// Returns true if another parameter type follows.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.params.len()
    }

    /// Rewinds to the first parameter.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Returns the remaining parameter text without consuming it.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.params[self.position..]
    }
}

impl<'a> Iterator for DescriptorCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        let len = type_length(rest);
        self.position += len;
        Some(&rest[..len])
    }
}

/// Byte length of the field type at the start of `text`.
fn type_length(text: &str) -> usize {
    let dims = text.bytes().take_while(|&b| b == b'[').count();
    let element = &text[dims..];
    let element_len = match element.chars().next() {
        None => 0,
        Some('L') => element.find(';').map_or(element.len(), |semi| semi + 1),
        Some(c) => c.len_utf8(),
    };
    dims + element_len
}

/// The return type of a method descriptor: everything after the last `)`.
///
/// A descriptor without `)` has no return type and yields `""`.
#[must_use]
pub fn return_type(desc: &str) -> &str {
    desc.rfind(')').map_or("", |close| &desc[close + 1..])
}

/// Splits a field type into its array depth and element type.
///
/// ```rust
/// use softmap::model::split_array;
///
/// assert_eq!(split_array("[[Ljava/lang/Object;"), (2, "Ljava/lang/Object;"));
/// assert_eq!(split_array("I"), (0, "I"));
/// ```
#[must_use]
pub fn split_array(ty: &str) -> (usize, &str) {
    let depth = ty.bytes().take_while(|&b| b == b'[').count();
    (depth, &ty[depth..])
}

/// The internal class name of an object element type (`Lname;`), if it is one.
#[must_use]
pub fn object_name(element: &str) -> Option<&str> {
    element
        .strip_prefix('L')
        .map(|rest| rest.strip_suffix(';').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_parameters() {
        let mut cursor = DescriptorCursor::new("(ZB[[Ljava/lang/Object;DLa;)La/b;");
        assert!(cursor.has_next());
        assert_eq!(cursor.next(), Some("Z"));
        assert_eq!(cursor.next(), Some("B"));
        assert_eq!(cursor.next(), Some("[[Ljava/lang/Object;"));
        assert_eq!(cursor.remaining(), "DLa;");
        assert_eq!(cursor.next(), Some("D"));
        assert_eq!(cursor.next(), Some("La;"));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), None);

        cursor.reset();
        assert_eq!(cursor.count(), 5);
    }

    #[test]
    fn empty_and_malformed() {
        assert_eq!(DescriptorCursor::new("()V").count(), 0);
        assert_eq!(DescriptorCursor::new("V").count(), 0);
        assert_eq!(DescriptorCursor::new(")(").count(), 0);

        let params: Vec<_> = DescriptorCursor::new("(ILa/b)V").collect();
        assert_eq!(params, ["I", "La/b"]);

        let params: Vec<_> = DescriptorCursor::new("(I[)V").collect();
        assert_eq!(params, ["I", "["]);
    }

    #[test]
    fn return_types() {
        assert_eq!(return_type("()V"), "V");
        assert_eq!(return_type("(I)[La/b;"), "[La/b;");
        assert_eq!(return_type("(I"), "");
    }

    #[test]
    fn elements() {
        assert_eq!(split_array("[I"), (1, "I"));
        assert_eq!(object_name("La/b;"), Some("a/b"));
        assert_eq!(object_name("La/b"), Some("a/b"));
        assert_eq!(object_name("I"), None);
    }
}
