//! Target platform.

/// Platform the binary is built for.
///
/// Windows builds produce `.exe` binaries, may hide the console window of
/// GUI programs, and are assembled into a redistributable directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPlatform {
    Windows,
    Unix,
}

impl TargetPlatform {
    /// The platform vb itself was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            TargetPlatform::Windows
        } else {
            TargetPlatform::Unix
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == TargetPlatform::Windows
    }

    /// File name of an executable called `stem`.
    pub fn exe_name(&self, stem: &str) -> String {
        match self {
            TargetPlatform::Windows => format!("{}.exe", stem),
            TargetPlatform::Unix => stem.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exe_name() {
        assert_eq!(TargetPlatform::Windows.exe_name("hello"), "hello.exe");
        assert_eq!(TargetPlatform::Unix.exe_name("hello"), "hello");
    }
}
