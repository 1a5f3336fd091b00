use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[cfg(feature = "unstable-dynamic")]
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate, ValueCompleter};

#[derive(Parser, Debug)]
#[command(name = "tocsmith")]
#[command(version)]
#[command(about = "A table-of-contents toolkit for static sites")]
#[command(
    long_about = "tocsmith - heading indexing, TOC injection, and a scroll-spy preview for\n\
    rendered HTML pages.\n\n\
    Launch without flags for the interactive preview: a dual-pane TUI with the page\n\
    outline on the left, whose active entry follows the content scroll position.\n\
    Use flags for CLI mode to list and analyze the outline, and subcommands to\n\
    inject TOC markup into pages or search the site corpus.\n\n\
    Examples:\n  \
    tocsmith post.html                 # Interactive preview\n  \
    tocsmith -l post.html              # List the outline\n  \
    tocsmith --tree post.html          # Show the outline tree\n  \
    tocsmith inject --in-place *.html  # Inject ids + TOC markup\n  \
    tocsmith search corpus.json rust   # Search the site corpus"
)]
pub struct Cli {
    /// Rendered HTML page to preview or analyze
    ///
    /// Path to a page produced by the site build (.html or .htm).
    /// Headings are taken from the page's <article> (or <main>) region.
    #[arg(add = html_file_completer())]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// List all outline entries (non-interactive)
    ///
    /// Displays every entry with its level indicator and identifier.
    /// Combine with --filter or --level to narrow results.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show the outline tree with box-drawing characters (non-interactive)
    ///
    /// Renders the nesting structure: level-2/3 entries under the nearest
    /// preceding lower-level entry.
    #[arg(long = "tree")]
    pub tree: bool,

    /// Count outline entries by level
    #[arg(long = "count")]
    pub count: bool,

    /// Filter entries by text pattern (case-insensitive)
    ///
    /// Only shows entries containing the specified text.
    /// Works with --list mode.
    ///
    /// Example: --filter "install" matches "Installation" and "Installing"
    #[arg(long = "filter", value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Show only entries at a specific level (1-3)
    ///
    /// Example: -L 2 shows only <h2> entries
    #[arg(short = 'L', long = "level", value_name = "LEVEL")]
    pub level: Option<u8>,

    /// Output format for --list and --tree modes
    ///
    /// Controls how entries are displayed:
    ///   plain - Human-readable text (default)
    ///   json  - JSON array for scripting/parsing
    ///   tree  - Box-drawing tree structure
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Set theme for TUI mode
    ///
    /// Override the saved theme preference. Available themes:
    /// OceanDark, Nord, Paper
    #[arg(long = "theme", value_name = "THEME")]
    pub theme: Option<String>,

    /// Force color mode (auto, rgb, 256)
    ///
    /// Override automatic terminal detection:
    ///   auto - Detect terminal capabilities (default)
    ///   rgb  - Force true color (16M colors)
    ///   256  - Force 256-color palette
    #[arg(long = "color-mode", value_name = "MODE")]
    pub color_mode: Option<ColorModeArg>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorModeArg {
    /// Automatically detect terminal capabilities
    Auto,
    /// Force RGB/true color mode
    Rgb,
    /// Force 256-color mode
    #[value(name = "256")]
    Color256,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Inject identifiers and TOC markup into pages
    ///
    /// Writes synthesized id attributes onto headings lacking one, inserts
    /// the inline TOC box at the top of the content region, and mirrors the
    /// list into the sidebar container when the page has one. Pages without
    /// a content region or with too few headings pass through unchanged.
    /// Safe to run repeatedly.
    Inject {
        /// Pages to process
        files: Vec<PathBuf>,

        /// Rewrite files in place (atomically) instead of printing to stdout
        #[arg(short = 'i', long = "in-place")]
        in_place: bool,

        /// Sidebar container class (overrides config)
        #[arg(long = "sidebar-class", value_name = "CLASS")]
        sidebar_class: Option<String>,

        /// Minimum headings required before a TOC is emitted (overrides config)
        #[arg(long = "min-headings", value_name = "N")]
        min_headings: Option<usize>,
    },

    /// Search the pre-built site corpus
    ///
    /// Case-insensitive substring search across title, excerpt, content and
    /// category of every page summary in the corpus JSON. Queries shorter
    /// than 2 characters return nothing; results are capped at 10.
    Search {
        /// Corpus file (JSON array of page summaries)
        corpus: PathBuf,

        /// Search query
        query: String,

        /// Emit results as JSON
        #[arg(long = "json")]
        json: bool,

        /// Open the top result's URL in the default browser
        #[arg(long = "open")]
        open: bool,

        /// Site base URL joined onto relative result URLs for --open
        ///
        /// Corpus entries store site-relative paths like /posts/x; without a
        /// base, --open only works for absolute URLs.
        #[arg(long = "base-url", value_name = "URL")]
        base_url: Option<String>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
    /// Tree format with box-drawing
    Tree,
}

#[cfg(feature = "unstable-dynamic")]
fn html_file_completer() -> ArgValueCompleter {
    use std::ffi::OsStr;
    use std::path::Path;

    struct HtmlCompleter;

    impl ValueCompleter for HtmlCompleter {
        fn complete(&self, current: &OsStr) -> Vec<CompletionCandidate> {
            let input_str = current.to_string_lossy();
            let input_path = Path::new(input_str.as_ref());

            let search_dir: &Path;
            let prefix: String;

            if input_str.is_empty() {
                search_dir = Path::new(".");
                prefix = String::new();
            } else if input_str.ends_with('/') || input_str.ends_with('\\') {
                search_dir = input_path;
                prefix = String::new();
            } else {
                // NOTE: parent() returns Some("") for simple filenames;
                // normalize empty paths to "." for correct completion
                let parent = input_path.parent().unwrap_or(Path::new("."));
                search_dir = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                prefix = input_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
            };

            let entries = match std::fs::read_dir(search_dir) {
                Ok(entries) => entries,
                Err(_) => return vec![],
            };

            entries
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.path();
                    let is_dir = path.is_dir();
                    let file_name = path.file_name()?.to_string_lossy().to_string();

                    if !prefix.is_empty()
                        && !file_name.to_lowercase().starts_with(&prefix.to_lowercase())
                    {
                        return None;
                    }

                    let completion_value = if search_dir == Path::new(".") {
                        file_name.clone()
                    } else {
                        search_dir.join(&file_name).to_string_lossy().to_string()
                    };

                    if is_dir {
                        let mut dir_completion = completion_value;
                        if !dir_completion.ends_with('/') {
                            dir_completion.push('/');
                        }
                        Some(
                            CompletionCandidate::new(dir_completion).help(Some("directory".into())),
                        )
                    } else if let Some(ext) = path.extension() {
                        let ext_lower = ext.to_string_lossy().to_lowercase();
                        if ext_lower == "html" || ext_lower == "htm" {
                            Some(CompletionCandidate::new(completion_value))
                        } else {
                            None
                        }
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
        }
    }

    ArgValueCompleter::new(HtmlCompleter)
}

#[cfg(not(feature = "unstable-dynamic"))]
fn html_file_completer() -> clap::builder::ValueHint {
    clap::ValueHint::FilePath
}
