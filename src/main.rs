//! # tocsmith
//!
//! A table-of-contents toolkit for static sites.
//!
//! ## Usage
//!
//! Launch the interactive preview:
//! ```sh
//! tocsmith post.html
//! ```
//!
//! List the outline:
//! ```sh
//! tocsmith -l post.html
//! ```
//!
//! Inject ids and TOC markup into built pages:
//! ```sh
//! tocsmith inject --in-place _site/**/*.html
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use std::process;
use tocsmith::outline::Outline;
use tocsmith::{Config, render, scanner, search};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle dynamic shell completions
    #[cfg(feature = "unstable-dynamic")]
    clap_complete::CompleteEnv::with_factory(|| {
        use clap::CommandFactory;
        Cli::command()
    })
    .complete();

    let args = Cli::parse();
    let mut config = Config::load();

    match args.command {
        Some(Command::Inject {
            ref files,
            in_place,
            ref sidebar_class,
            min_headings,
        }) => {
            let min_headings = min_headings.unwrap_or(config.toc.min_headings);
            let sidebar_class = sidebar_class
                .as_deref()
                .unwrap_or(&config.toc.sidebar_class);
            return handle_inject(files, in_place, min_headings, sidebar_class);
        }
        Some(Command::Search {
            ref corpus,
            ref query,
            json,
            open,
            ref base_url,
        }) => return handle_search(corpus, query, json, open, base_url.as_deref()),
        None => {}
    }

    let Some(ref file) = args.file else {
        eprintln!("Error: HTML page argument is required");
        eprintln!("\nUsage: tocsmith [OPTIONS] <FILE>");
        eprintln!("       tocsmith inject [OPTIONS] <FILES>...");
        eprintln!("       tocsmith search <CORPUS> <QUERY>");
        process::exit(1);
    };

    let page = match scanner::scan_file(file) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            process::exit(1);
        }
    };
    let outline = Outline::build(&page.headings, config.toc.min_headings);

    // CLI modes print and exit; no flags means the interactive preview
    if args.list || args.tree || args.count {
        handle_cli_mode(&args, &outline);
        return Ok(());
    }

    if !tocsmith::tui::tty::stdin_is_tty() {
        eprintln!("Error: the interactive preview needs a terminal on stdin");
        eprintln!("Use -l, --tree or --count for non-interactive output.");
        process::exit(1);
    }

    if let Some(ref theme_name) = args.theme {
        config.ui.theme = theme_name.clone();
    }

    let caps = tocsmith::tui::TerminalCapabilities::detect();
    let color_mode = match args.color_mode {
        Some(cli::ColorModeArg::Rgb) => tocsmith::tui::ColorMode::Rgb,
        Some(cli::ColorModeArg::Color256) => tocsmith::tui::ColorMode::Indexed256,
        Some(cli::ColorModeArg::Auto) | None => caps.recommended_color_mode,
    };

    use crossterm::ExecutableCommand;
    use crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    };
    use std::io::stdout;

    enable_raw_mode().inspect_err(|e| {
        eprintln!("Failed to enable raw mode: {}", e);
    })?;

    stdout().execute(EnterAlternateScreen).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("page")
        .to_string();
    let file_path = file.canonicalize().unwrap_or_else(|_| file.clone());

    let app = tocsmith::App::new(page, outline, filename, file_path, config, color_mode);
    let result = tocsmith::tui::run(&mut terminal, app);

    stdout().execute(LeaveAlternateScreen).ok();
    disable_raw_mode().ok();

    result
}

fn handle_inject(
    files: &[PathBuf],
    in_place: bool,
    min_headings: usize,
    sidebar_class: &str,
) -> Result<()> {
    if files.is_empty() {
        eprintln!("Error: no pages given");
        process::exit(1);
    }

    for file in files {
        if in_place {
            match render::inject_file(file, min_headings, sidebar_class) {
                Ok(()) => eprintln!("{}: ok", file.display()),
                Err(e) => {
                    eprintln!("{}: {}", file.display(), e);
                    process::exit(1);
                }
            }
        } else {
            let html = match std::fs::read_to_string(file) {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("{}: {}", file.display(), e);
                    process::exit(1);
                }
            };
            print!("{}", render::inject_page(&html, min_headings, sidebar_class));
        }
    }
    Ok(())
}

fn handle_search(
    corpus_path: &Path,
    query: &str,
    json: bool,
    open_top: bool,
    base_url: Option<&str>,
) -> Result<()> {
    let corpus = match search::Corpus::load(corpus_path) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error reading {}: {}", corpus_path.display(), e);
            process::exit(1);
        }
    };

    let results = corpus.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("No results for '{}'", query.trim());
    } else {
        for entry in &results {
            println!("{} - {}", entry.title, entry.url);
            let excerpt = entry.short_excerpt(80);
            if !excerpt.is_empty() {
                println!("    {}", excerpt);
            }
        }
    }

    if open_top {
        if let Some(top) = results.first() {
            open::that(search::resolve_url(base_url, &top.url))?;
        }
    }
    Ok(())
}

fn handle_cli_mode(args: &Cli, outline: &Outline) {
    if args.count {
        print_entry_counts(outline);
        return;
    }
    if args.tree {
        print_tree(outline, &args.output);
        return;
    }

    let entries: Vec<_> = if let Some(level) = args.level {
        outline.at_level(level)
    } else if let Some(ref pattern) = args.filter {
        outline.filter(pattern)
    } else {
        outline.entries.iter().collect()
    };

    match args.output {
        OutputFormat::Plain => {
            for entry in &entries {
                let prefix = "#".repeat(entry.level as usize);
                println!("{} {} [{}]", prefix, entry.text, entry.id);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing outline: {}", e);
                process::exit(1);
            }
        },
        OutputFormat::Tree => {
            eprintln!("Use --tree for tree output");
            process::exit(1);
        }
    }
}

fn print_tree(outline: &Outline, format: &OutputFormat) {
    match format {
        OutputFormat::Tree | OutputFormat::Plain => {
            let tree = outline.tree();
            for (i, node) in tree.iter().enumerate() {
                let is_last = i == tree.len() - 1;
                print!("{}", node.render_box_tree("", is_last));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&outline.entries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing outline: {}", e);
                process::exit(1);
            }
        },
    }
}

fn print_entry_counts(outline: &Outline) {
    let counts = outline.counts();

    println!("Outline entries:");
    for (level, count) in counts.iter().enumerate() {
        if *count > 0 {
            println!("  h{}: {}", level + 1, count);
        }
    }
    println!("\nTotal: {}", outline.len());
}
