//! Call-site records.
//!
//! A [`Location`] names the source position a capture call was made from.
//! The library never inspects call stacks itself; locations are built by the
//! caller, normally through the [`here!`](crate::here) macro which expands
//! `file!()`, `line!()` and `module_path!()` at the call site.

use serde::{Deserialize, Serialize};

/// An immutable call-site record.
///
/// `line_number` is 1-based, the way `line!()` reports it;
/// [`line_index`](Location::line_index) gives the 0-based form used to index
/// into the loaded source lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    file_name: String,
    module_path: String,
    method_name: String,
    line_number: usize,
}

impl Location {
    pub fn new(
        file_name: impl Into<String>,
        module_path: impl Into<String>,
        method_name: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            module_path: module_path.into(),
            method_name: method_name.into(),
            line_number,
        }
    }

    /// Path of the source file, as `file!()` reports it.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Module path of the call site.
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// Name of the method the call was made from.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// 1-based source line of the call.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 0-based index of the call line.
    pub fn line_index(&self) -> usize {
        self.line_number.saturating_sub(1)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} in {}",
            self.file_name, self.line_number, self.method_name
        )
    }
}

/// Build a [`Location`] for the current source line.
///
/// With no arguments the surrounding function's name is used as the method
/// name; passing an explicit name overrides that, which matters inside
/// closures or when one function records on behalf of another.
///
/// # Example
///
/// ```ignore
/// recording.begin(here!());
/// recording.set_output(here!("other_method"), "label", "text");
/// ```
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(
            file!(),
            module_path!(),
            $crate::__function_name!(),
            line!() as usize,
        )
    };
    ($method:expr) => {
        $crate::Location::new(file!(), module_path!(), $method, line!() as usize)
    };
}

/// Name of the surrounding function, without its module path.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __testdoc_anchor() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(__testdoc_anchor);
        let name = &name[..name.len() - "::__testdoc_anchor".len()];
        match name.rfind("::") {
            Some(position) => &name[position + 2..],
            None => name,
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_is_zero_based() {
        let location = Location::new("src/lib.rs", "testdoc", "some_method", 12);
        assert_eq!(location.line_number(), 12);
        assert_eq!(location.line_index(), 11);
    }

    #[test]
    fn test_display_names_file_line_and_method() {
        let location = Location::new("src/lib.rs", "testdoc", "some_method", 12);
        assert_eq!(location.to_string(), "src/lib.rs:12 in some_method");
    }

    #[test]
    fn test_here_captures_the_current_line() {
        let location = here!("explicit");
        let next = here!("explicit");
        assert_eq!(location.file_name(), file!());
        assert_eq!(location.method_name(), "explicit");
        assert_eq!(next.line_number(), location.line_number() + 1);
    }

    #[test]
    fn test_here_derives_the_function_name() {
        let location = here!();
        assert_eq!(location.method_name(), "test_here_derives_the_function_name");
    }
}
