//! Headers that make one file both a POSIX `sh` script and a Python program.
//!
//! The generated header is
//!
//! ```text
//! #!/bin/sh
//! '''': pshprs
//! <sh script>
//! '''
//! ```
//!
//! `sh` reads `''''` as two empty strings glued onto `:`, the no-op command,
//! so the marker line does nothing and the embedded script runs. The script
//! must leave via `exit` or `exec` on every path: `sh` parses lazily and
//! never reaches the unbalanced `'''` or the Python code after it.
//!
//! Python reads `'''` ... `'''` as one triple-quoted string expression and
//! ignores it, then runs whatever follows the header.

use std::fmt;
use std::io::{self, Read};

use crate::{Error, Result};

/// Interpreter named by the redirector shebang.
pub const REDIRECTOR_INTERPRETER: &str = "/bin/sh";

/// First line of the trailing block; detection keys off these exact bytes.
pub const REDIRECTOR_MARKER: &str = "'''': pshprs\n";

const CLOSING_QUOTES: &str = "'''";

/// A `#!/bin/sh` shebang line and the block that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectorHeader {
    shebang:        String,
    trailing_block: String,
}

impl RedirectorHeader {
    /// Build a header around `sh_script`.
    ///
    /// `sh_script` must be POSIX `sh` that terminates on every execution
    /// path with an explicit `exit` or `exec`. This is not checked. Trailing
    /// whitespace is dropped.
    ///
    /// # Errors
    /// [`Error::EmptyScript`] if `sh_script` is empty or only whitespace.
    pub fn new(sh_script: &str) -> Result<Self> {
        let script = sh_script.trim_end();
        if script.trim_start().is_empty() {
            return Err(Error::EmptyScript);
        }

        let mut trailing_block =
            String::with_capacity(REDIRECTOR_MARKER.len() + script.len() + 1 + CLOSING_QUOTES.len());
        trailing_block.push_str(REDIRECTOR_MARKER);
        trailing_block.push_str(script);
        trailing_block.push('\n');
        trailing_block.push_str(CLOSING_QUOTES);

        Ok(Self {
            shebang: format!("#!{REDIRECTOR_INTERPRETER}"),
            trailing_block,
        })
    }

    /// `#!/bin/sh`, without a line ending.
    pub fn shebang(&self) -> &str { &self.shebang }

    /// The marker line, the script and the closing quotes, without a final
    /// line ending.
    pub fn trailing_block(&self) -> &str { &self.trailing_block }

    /// Shebang and trailing block joined by a newline.
    pub fn to_header(&self) -> String { self.to_string() }

    pub fn into_parts(self) -> (String, String) { (self.shebang, self.trailing_block) }
}

impl fmt::Display for RedirectorHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.shebang, self.trailing_block)
    }
}

/// Whether a script with shebang line `shebang` and `rest` positioned after
/// that line carries a redirector header.
pub(crate) fn is_redirector(shebang: &[u8], rest: &mut dyn Read) -> io::Result<bool> {
    if shebang != REDIRECTOR_INTERPRETER.as_bytes() {
        return Ok(false);
    }
    let marker = REDIRECTOR_MARKER.as_bytes();
    let mut next = Vec::with_capacity(marker.len());
    rest.take(marker.len() as u64).read_to_end(&mut next)?;
    Ok(next == marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_thirteen_bytes() {
        assert_eq!(REDIRECTOR_MARKER.len(), 13);
        assert!(REDIRECTOR_MARKER.starts_with("'''': "));
        assert!(REDIRECTOR_MARKER.ends_with('\n'));
    }

    #[test]
    fn header_layout() {
        let header = RedirectorHeader::new("exec python3 \"$0\" \"$@\"\n\n").unwrap();
        assert_eq!(header.shebang(), "#!/bin/sh");
        assert_eq!(
            header.trailing_block(),
            "'''': pshprs\nexec python3 \"$0\" \"$@\"\n'''"
        );
        assert_eq!(
            header.to_header(),
            "#!/bin/sh\n'''': pshprs\nexec python3 \"$0\" \"$@\"\n'''"
        );
    }

    #[test]
    fn marker_follows_shebang_line() {
        let header = RedirectorHeader::new("exit 1").unwrap();
        let text = header.to_header();
        let (first, rest) = text.split_once('\n').unwrap();
        assert_eq!(first, "#!/bin/sh");
        assert!(rest.starts_with(REDIRECTOR_MARKER));
    }

    #[test]
    fn multiline_script_kept_verbatim() {
        let script = "if command -v python3 >/dev/null; then\n  exec python3 \"$0\" \"$@\"\nfi\nexit 1";
        let header = RedirectorHeader::new(script).unwrap();
        let (shebang, block) = header.into_parts();
        assert_eq!(shebang, "#!/bin/sh");
        assert_eq!(block, format!("{REDIRECTOR_MARKER}{script}\n'''"));
    }

    #[test]
    fn empty_script_rejected() {
        assert!(matches!(RedirectorHeader::new(""), Err(Error::EmptyScript)));
        assert!(matches!(
            RedirectorHeader::new(" \n\t\n"),
            Err(Error::EmptyScript)
        ));
    }

    #[test]
    fn recognizes_marker_after_sh_shebang() {
        let mut rest: &[u8] = b"'''': pshprs\nexit 0\n";
        assert!(is_redirector(b"/bin/sh", &mut rest).unwrap());
    }

    #[test]
    fn rejects_other_shebangs_and_markers() {
        let mut rest: &[u8] = b"'''': pshprs\n";
        assert!(!is_redirector(b"/bin/bash", &mut rest).unwrap());

        let mut rest: &[u8] = b"'''': other\n";
        assert!(!is_redirector(b"/bin/sh", &mut rest).unwrap());

        let mut rest: &[u8] = b"'''': pshprs";
        assert!(!is_redirector(b"/bin/sh", &mut rest).unwrap());
    }
}
