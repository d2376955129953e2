//! JSON Pointer (RFC 6901) rendering of traversal paths.
//!
//! Errors report where in the document they happened as a pointer such as
//! `/users/1/age`. The root of the document is the empty pointer `""`.

/// Formats path steps as a JSON Pointer.
///
/// Inside a step `~` is written as `~0` and `/` as `~1`.
///
/// # Example
///
/// ```
/// use json_codec::path::format_pointer;
///
/// assert_eq!(format_pointer::<&str>(&[]), "");
/// assert_eq!(format_pointer(&["users", "1", "age"]), "/users/1/age");
/// assert_eq!(format_pointer(&["a~b", "c/d"]), "/a~0b/c~1d");
/// ```
pub fn format_pointer<S: AsRef<str>>(steps: &[S]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push('/');
        for c in step.as_ref().chars() {
            match c {
                '~' => out.push_str("~0"),
                '/' => out.push_str("~1"),
                c => out.push(c),
            }
        }
    }
    out
}
