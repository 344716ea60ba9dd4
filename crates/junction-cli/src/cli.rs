//! Command-line interface for the junction utility
//!
//! Renders diagram markup, prints routed connectors, and shows a demo diagram.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_frame;
use junction::core::logging::init_logging;
use junction::markup::MarkupParser;
use junction::{CharacterSet, Connector, Frame, Point, RenderConfig, Segment, COORDINATE_LIMIT};

/// Sample diagram shown by `junction demo`
pub const DEMO_DIAGRAM: &str = r#"%% four labelled nodes and one free-standing connector
node n1 "test 1" at 0,0
node n2 "test2" at 28,6
node n3 "test3" at 28,-6
node n4 "test4" at 56,0
connect n1 -> n2
connect n1 -> n3
connect n2 -> n4
connect n3 -> n4
connect 14,10 -> 42,12
"#;

/// Junction - Draw orthogonal connector diagrams in the terminal
#[derive(Parser)]
#[command(name = "junction")]
#[command(about = "Route right-angle connectors between boxes and draw them as text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render diagram markup as text
    Render {
        /// Input file containing diagram markup (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the rendered diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set to use for rendering output
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Route a single connector and list its segments
    Route {
        /// Start point as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Point,

        /// End point as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Point,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Render a built-in sample diagram
    Demo {
        /// Character set to use for rendering output
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Validate diagram markup
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Parse a grid point written as `X,Y`, each within `±COORDINATE_LIMIT`
fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let coordinate = |v: &str| {
        let v = v.trim();
        let value = v
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", v, e))?;
        if value.unsigned_abs() > COORDINATE_LIMIT as u32 {
            return Err(format!(
                "coordinate out of range: {} (limit is ±{})",
                v, COORDINATE_LIMIT
            ));
        }
        Ok(value)
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

/// One routed segment, as printed by `route --json`
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SegmentRecord {
    Terminal {
        x: i32,
        y: i32,
        terminal: String,
    },
    Line {
        x: i32,
        y: i32,
        direction: String,
        length: usize,
        sign: bool,
    },
    Elbow {
        x: i32,
        y: i32,
        orientation: String,
    },
}

impl From<&Segment> for SegmentRecord {
    fn from(segment: &Segment) -> Self {
        match *segment {
            Segment::Terminal { point, kind } => SegmentRecord::Terminal {
                x: point.x,
                y: point.y,
                terminal: kind.to_string(),
            },
            Segment::Line {
                point,
                direction,
                length,
                sign,
            } => SegmentRecord::Line {
                x: point.x,
                y: point.y,
                direction: direction.to_string(),
                length,
                sign,
            },
            Segment::Elbow { point, orientation } => SegmentRecord::Elbow {
                x: point.x,
                y: point.y,
                orientation: orientation.to_string(),
            },
        }
    }
}

/// A routed connector, as printed by `route --json`
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub from: [i32; 2],
    pub to: [i32; 2],
    pub direction: String,
    pub segments: Vec<SegmentRecord>,
}

impl From<&Connector> for RouteReport {
    fn from(connector: &Connector) -> Self {
        Self {
            from: [connector.start().x, connector.start().y],
            to: [connector.end().x, connector.end().y],
            direction: connector.direction().to_string(),
            segments: connector.segments().iter().map(SegmentRecord::from).collect(),
        }
    }
}

/// Main CLI application
pub struct JunctionApp {
    parser: MarkupParser,
    config: RenderConfig,
}

impl JunctionApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            parser: MarkupParser::new(),
            config,
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level_str = std::env::var("JUNCTION_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("JUNCTION_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Junction v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                style,
                color,
            } => self.render_command(input, output, style, color, cli.verbose),
            Commands::Route { from, to, json } => self.route_command(from, to, json, cli.verbose),
            Commands::Demo { style, color } => self.demo_command(style, color, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the render command
    fn render_command(
        &mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        style: StyleChoice,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        debug!(bytes = content.len(), ?style, ?color, "render input read");

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        self.config = RenderConfig::new(style.into());
        let frame = self.render_markup(&content)?;

        if verbose {
            eprintln!(
                "Rendered a {}x{} frame",
                frame.width(),
                frame.height()
            );
        }

        let text = if self.should_colorize(&output, color) {
            colorize_frame(&frame)
        } else {
            frame.to_string()
        };
        self.write_output(output, &text)
    }

    /// Handle the route command
    fn route_command(&self, from: Point, to: Point, json: bool, verbose: bool) -> Result<()> {
        let connector = Connector::new(from, to);
        info!(%from, %to, segments = connector.segments().len(), "routed connector");

        if verbose {
            eprintln!(
                "Routed {} -> {} along {} in {} segments",
                from,
                to,
                connector.direction(),
                connector.segments().len()
            );
        }

        if json {
            let report = RouteReport::from(&connector);
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if connector.is_empty() {
            println!("(empty route)");
        } else {
            for segment in connector.segments() {
                println!("{}", segment);
            }
        }

        Ok(())
    }

    /// Handle the demo command
    fn demo_command(&mut self, style: StyleChoice, color: ColorChoice, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Rendering built-in demo diagram");
        }

        self.config = RenderConfig::new(style.into());
        let frame = self.render_markup(DEMO_DIAGRAM)?;

        let text = if self.should_colorize(&None, color) {
            colorize_frame(&frame)
        } else {
            frame.to_string()
        };
        self.write_output(None, &text)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.parser.parse(&content) {
            Ok(diagram) => {
                println!(
                    "✓ Valid diagram: {} nodes, {} connectors",
                    diagram.node_count(),
                    diagram.connector_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid diagram: {}", e);
                Err(e.into())
            }
        }
    }

    /// Parse markup and compose it with the current config
    pub fn render_markup(&self, content: &str) -> Result<Frame> {
        let diagram = self.parser.parse(content)?;
        Ok(diagram.render(self.config))
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // Only colorize if outputting to stdout and it's a terminal
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(ref p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Current render config (for testing)
    #[cfg(test)]
    pub fn config(&self) -> RenderConfig {
        self.config
    }
}

impl Default for JunctionApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "junction",
            "render",
            "--input",
            "diagram.jn",
            "--output",
            "output.txt",
            "--style",
            "ascii",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                output,
                style,
                color,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "diagram.jn");
                assert_eq!(output.unwrap().to_string_lossy(), "output.txt");
                assert_eq!(style, StyleChoice::Ascii);
                assert_eq!(color, ColorChoice::Auto); // default
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_route_command_with_negative_points() {
        let args = vec!["junction", "route", "--from", "-3,4", "--to", "5,-2", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Route { from, to, json } => {
                assert_eq!(from, Point::new(-3, 4));
                assert_eq!(to, Point::new(5, -2));
                assert!(json);
            }
            _ => panic!("Expected Route command"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_point() {
        let args = vec!["junction", "route", "--from", "3;4", "--to", "0,0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10, -2").unwrap(), Point::new(10, -2));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("99999999999,0").is_err());
    }

    #[test]
    fn test_parse_point_limit() {
        assert_eq!(parse_point("1000,-1000").unwrap(), Point::new(1000, -1000));
        assert!(parse_point("1001,0").unwrap_err().contains("out of range"));
        assert!(parse_point("0,-1001").unwrap_err().contains("out of range"));
        assert!(parse_point("2147483647,0").is_err());
    }

    #[test]
    fn test_cli_parsing_demo_and_validate() {
        let cli = Cli::try_parse_from(vec!["junction", "demo", "--color", "never"]).unwrap();
        match cli.command {
            Commands::Demo { style, color } => {
                assert_eq!(style, StyleChoice::Unicode);
                assert_eq!(color, ColorChoice::Never);
            }
            _ => panic!("Expected Demo command"),
        }

        let cli = Cli::try_parse_from(vec!["junction", "validate"]).unwrap();
        match cli.command {
            Commands::Validate { input } => assert!(input.is_none()),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = vec!["junction", "demo", "--verbose", "--log-level", "debug"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_demo_diagram_renders() {
        let app = JunctionApp::new();
        let frame = app.render_markup(DEMO_DIAGRAM).unwrap();
        let text = frame.to_string();
        for label in ["test 1", "test2", "test3", "test4"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains('▶'));
    }

    #[test]
    fn test_render_markup_uses_config() {
        let app = JunctionApp::with_config(RenderConfig::new(CharacterSet::Ascii));
        assert_eq!(app.config().style, CharacterSet::Ascii);
        let frame = app.render_markup("connect 0,0 -> 3,0").unwrap();
        assert_eq!(frame.to_string(), "o-->");
    }

    #[test]
    fn test_route_report_json_shape() {
        let connector = Connector::new(Point::new(0, 0), Point::new(6, 2));
        let value = serde_json::to_value(RouteReport::from(&connector)).unwrap();
        assert_eq!(value["direction"], "H");
        assert_eq!(value["segments"].as_array().unwrap().len(), 7);
        assert_eq!(value["segments"][0]["kind"], "terminal");
        assert_eq!(value["segments"][0]["terminal"], "start");
        assert_eq!(value["segments"][2]["kind"], "elbow");
        assert_eq!(value["segments"][2]["orientation"], "SW");
        assert_eq!(value["segments"][5]["length"], 2);
        assert_eq!(value["segments"][6]["terminal"], "right");
    }

    #[test]
    fn test_read_input_from_file() {
        let app = JunctionApp::new();
        let input = "node a at 0,0";

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.jn");
        fs::write(&file_path, input).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, input);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = JunctionApp::new();
        let err = app
            .read_input(Some(PathBuf::from("/nonexistent/diagram.jn")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = JunctionApp::new();
        let output = "Test output";

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("output.txt");

        app.write_output(Some(file_path.clone()), output).unwrap();

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, output);
    }

    #[test]
    fn test_never_colorize() {
        let app = JunctionApp::new();
        assert!(!app.should_colorize(&None, ColorChoice::Never));
        assert!(app.should_colorize(&None, ColorChoice::Always));
        assert!(!app.should_colorize(&Some(PathBuf::from("out.txt")), ColorChoice::Auto));
    }
}
