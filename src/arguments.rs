//! Rendering task options into the analyzer's command-line arguments.
//!
//! Layout of a complete invocation:
//!
//! ```text
//! [option flags...] -output-dir <dir> [-keep a,b,c] [input paths...]
//! ```
//!
//! Option flags come in a fixed order so the same task always renders the
//! same argument list. Input paths are attached after assembly with
//! [`InvocationArguments::with_inputs`].

use crate::config::AnalyzerOptions;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const OUTPUT_DIR_FLAG: &str = "-output-dir";
pub const KEEP_FLAG: &str = "-keep";

/// Separator between keep-list entries inside the single `-keep` argument
pub const KEEP_SEPARATOR: &str = ",";

/// Argument list for one analyzer run.
///
/// Held as OS strings so paths reach the analyzer byte for byte, even when
/// they are not valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArguments {
    /// Option flags, output directive and keep-list
    pub flags: Vec<OsString>,
    /// Content paths, declared sources first
    pub inputs: Vec<PathBuf>,
}

impl InvocationArguments {
    /// Attach the assembled input files
    pub fn with_inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Flags followed by inputs, as one flat list
    pub fn to_args(&self) -> Vec<OsString> {
        self.flags
            .iter()
            .cloned()
            .chain(self.inputs.iter().map(|p| p.as_os_str().to_os_string()))
            .collect()
    }

    /// Lossy rendering of [`to_args`](Self::to_args) for logs and reports
    pub fn to_display_args(&self) -> Vec<String> {
        self.to_args()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

/// Render options, the output directory and the keep-list.
///
/// Keep-list entries are joined as given: no sorting, no deduplication.
pub fn build(options: &AnalyzerOptions, keep: &[String], output_dir: &Path) -> InvocationArguments {
    let mut flags: Vec<OsString> = render_options(options)
        .into_iter()
        .map(OsString::from)
        .collect();

    flags.push(OUTPUT_DIR_FLAG.into());
    flags.push(output_dir.as_os_str().to_os_string());

    if !keep.is_empty() {
        flags.push(KEEP_FLAG.into());
        flags.push(keep.join(KEEP_SEPARATOR).into());
    }

    InvocationArguments {
        flags,
        inputs: Vec::new(),
    }
}

fn render_options(options: &AnalyzerOptions) -> Vec<String> {
    let switches = [
        (options.verbose, "-verbose"),
        (options.suppress_warnings, "-nowarn"),
        (options.all_warnings_as_errors, "-Werror"),
        (options.print_reachability_info, "-print-reachability-info"),
        (options.dev_mode, "-dev-mode"),
    ];

    let mut flags: Vec<String> = switches
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, flag)| flag.to_string())
        .collect();

    if let Some(strategy) = options.dev_mode_overwriting_strategy {
        flags.push("-dev-mode-overwriting-strategy".to_string());
        flags.push(strategy.as_str().to_string());
    }

    flags.extend(options.free_args.iter().cloned());
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverwritingStrategy;
    use pretty_assertions::assert_eq;

    fn keep(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_render_only_output_dir() {
        let args = build(&AnalyzerOptions::default(), &[], Path::new("/out"));
        assert_eq!(args.flags, vec!["-output-dir", "/out"]);
        assert!(args.inputs.is_empty());
    }

    #[test]
    fn test_keep_list_is_one_argument_in_order() {
        let args = build(
            &AnalyzerOptions::default(),
            &keep(&["pkg.Foo", "pkg.Bar"]),
            Path::new("/out"),
        );
        assert_eq!(
            args.flags,
            vec!["-output-dir", "/out", "-keep", "pkg.Foo,pkg.Bar"]
        );
    }

    #[test]
    fn test_keep_list_is_not_deduplicated() {
        let args = build(
            &AnalyzerOptions::default(),
            &keep(&["pkg.Foo", "pkg.Bar", "pkg.Foo"]),
            Path::new("/out"),
        );
        assert_eq!(args.flags.last().unwrap(), "pkg.Foo,pkg.Bar,pkg.Foo");
    }

    #[test]
    fn test_options_render_in_fixed_order_before_output_dir() {
        let options = AnalyzerOptions {
            dev_mode: true,
            verbose: true,
            print_reachability_info: true,
            dev_mode_overwriting_strategy: Some(OverwritingStrategy::Older),
            free_args: vec!["-Xextra".to_string()],
            ..Default::default()
        };
        let args = build(&options, &[], Path::new("out"));
        assert_eq!(
            args.flags,
            vec![
                "-verbose",
                "-print-reachability-info",
                "-dev-mode",
                "-dev-mode-overwriting-strategy",
                "older",
                "-Xextra",
                "-output-dir",
                "out",
            ]
        );
    }

    #[test]
    fn test_to_args_puts_inputs_last() {
        let args = build(&AnalyzerOptions::default(), &keep(&["a.B"]), Path::new("out"))
            .with_inputs(vec![PathBuf::from("s1.js"), PathBuf::from("e1.js")]);
        assert_eq!(
            args.to_args(),
            vec!["-output-dir", "out", "-keep", "a.B", "s1.js", "e1.js"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_are_passed_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let output_dir = Path::new(OsStr::from_bytes(b"out-\xfe"));
        let source = PathBuf::from(OsStr::from_bytes(b"app-\xff.js"));
        let args = build(&AnalyzerOptions::default(), &[], output_dir)
            .with_inputs(vec![source.clone()]);

        let rendered = args.to_args();
        assert_eq!(rendered[1].as_bytes(), b"out-\xfe");
        assert_eq!(rendered[2], source.into_os_string());
        assert_eq!(args.to_display_args()[2], "app-\u{FFFD}.js");
    }

    #[test]
    fn test_build_is_deterministic() {
        let options = AnalyzerOptions {
            suppress_warnings: true,
            ..Default::default()
        };
        let names = keep(&["x.Y"]);
        assert_eq!(
            build(&options, &names, Path::new("o")),
            build(&options, &names, Path::new("o"))
        );
    }
}
