//! Diagram markup parser using chumsky
//!
//! ```text
//! %% a comment
//! node a "test 1" at 0,0
//! node b at 16,8; connect a -> b
//! connect 10,2 -> 10,10
//! ```

use chumsky::prelude::*;
use tracing::{debug, span, trace, Level};

use crate::core::{Diagram, DiagramError, Node, Point, COORDINATE_LIMIT};

type Extra<'src> = extra::Err<Rich<'src, char>>;

/// One end of a `connect` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A declared node, attached on the side facing the other end
    Node(String),
    /// A raw grid point
    Point(Point),
}

/// Parsed markup statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Node declaration: `node <id> ["label"] at <x>,<y>`
    Node {
        id: String,
        label: Option<String>,
        position: Point,
    },
    /// Connector: `connect <endpoint> -> <endpoint>`
    Connect { from: Endpoint, to: Endpoint },
}

/// Markup parser
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl MarkupParser {
    pub fn new() -> Self {
        Self
    }

    /// Spaces and tabs; newlines separate statements
    fn inline_ws<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
        one_of(" \t\r").repeated()
    }

    fn gap<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
        one_of(" \t\r").repeated().at_least(1)
    }

    /// Parse an optionally negative coordinate within `±COORDINATE_LIMIT`
    fn integer<'src>() -> impl Parser<'src, &'src str, i32, Extra<'src>> + Clone {
        just('-')
            .or_not()
            .then(text::int(10))
            .to_slice()
            .try_map(|digits: &str, span| {
                digits
                    .parse::<i32>()
                    .ok()
                    .filter(|value| value.unsigned_abs() <= COORDINATE_LIMIT as u32)
                    .ok_or_else(|| {
                        Rich::custom(
                            span,
                            format!(
                                "coordinate out of range: {} (limit is ±{})",
                                digits, COORDINATE_LIMIT
                            ),
                        )
                    })
            })
    }

    /// Parse a grid point: `x,y`
    fn point<'src>() -> impl Parser<'src, &'src str, Point, Extra<'src>> + Clone {
        Self::integer()
            .then_ignore(just(',').padded_by(Self::inline_ws()))
            .then(Self::integer())
            .map(|(x, y)| Point::new(x, y))
    }

    /// Parse an identifier (node id)
    fn identifier<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
        any()
            .filter(|c: &char| c.is_alphanumeric() || *c == '_')
            .repeated()
            .at_least(1)
            .collect::<String>()
            .labelled("identifier")
    }

    /// Parse a quoted label on a single line
    fn quoted_string<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
        none_of("\"\n")
            .repeated()
            .collect::<String>()
            .delimited_by(just('"'), just('"'))
            .labelled("label")
    }

    fn endpoint<'src>() -> impl Parser<'src, &'src str, Endpoint, Extra<'src>> + Clone {
        Self::point()
            .map(Endpoint::Point)
            .or(Self::identifier().map(Endpoint::Node))
    }

    /// Parse a node declaration: `node <id> ["label"] at <x>,<y>`
    fn node_parser<'src>() -> impl Parser<'src, &'src str, Statement, Extra<'src>> + Clone {
        text::keyword("node")
            .ignore_then(Self::gap())
            .ignore_then(Self::identifier())
            .then(Self::gap().ignore_then(Self::quoted_string()).or_not())
            .then_ignore(Self::gap())
            .then_ignore(text::keyword("at"))
            .then_ignore(Self::gap())
            .then(Self::point())
            .map(|((id, label), position)| Statement::Node {
                id,
                label,
                position,
            })
    }

    /// Parse a connector: `connect <endpoint> -> <endpoint>`
    fn connect_parser<'src>() -> impl Parser<'src, &'src str, Statement, Extra<'src>> + Clone {
        text::keyword("connect")
            .ignore_then(Self::gap())
            .ignore_then(Self::endpoint())
            .then_ignore(just("->").padded_by(Self::inline_ws()))
            .then(Self::endpoint())
            .map(|(from, to)| Statement::Connect { from, to })
    }

    /// Statements separated by newlines or `;`, with `%%` comments
    fn program_parser<'src>() -> impl Parser<'src, &'src str, Vec<Statement>, Extra<'src>> {
        let comment = just("%%")
            .then(any().and_is(just('\n').not()).repeated())
            .ignored();

        let statement = choice((Self::node_parser(), Self::connect_parser()));

        let line = Self::inline_ws()
            .ignore_then(statement.or_not())
            .then_ignore(Self::inline_ws())
            .then_ignore(comment.or_not());

        line.separated_by(one_of(";\n"))
            .collect::<Vec<_>>()
            .then_ignore(end())
            .map(|lines| lines.into_iter().flatten().collect())
    }

    /// Parse markup into statements without building a diagram
    pub fn parse_statements(&self, input: &str) -> Result<Vec<Statement>, DiagramError> {
        Self::program_parser()
            .parse(input)
            .into_result()
            .map_err(|errors| {
                let first = errors.into_iter().next();
                let (message, offset) = first.map_or_else(
                    || ("invalid markup".to_string(), 0),
                    |e| (e.to_string(), e.span().start),
                );
                DiagramError::parse_error_at(message, input, offset)
            })
    }

    /// Parse markup and build the diagram it describes
    ///
    /// All nodes are declared before any connector is resolved, so connectors
    /// may name nodes declared further down.
    pub fn parse(&self, input: &str) -> Result<Diagram, DiagramError> {
        let parse_span = span!(Level::INFO, "parse_markup", input_len = input.len());
        let _enter = parse_span.enter();

        let statements = self.parse_statements(input)?;
        trace!(statement_count = statements.len(), "Parsed statements");

        let mut diagram = Diagram::new();
        let mut connects = Vec::new();
        for statement in statements {
            match statement {
                Statement::Node {
                    id,
                    label,
                    position,
                } => {
                    let node = match label {
                        Some(label) => Node::with_label(id, label, position),
                        None => Node::new(id, position),
                    };
                    diagram.add_node(node)?;
                }
                Statement::Connect { from, to } => connects.push((from, to)),
            }
        }

        for (from, to) in connects {
            match (from, to) {
                (Endpoint::Node(from), Endpoint::Node(to)) => diagram.connect_nodes(&from, &to)?,
                (Endpoint::Point(start), Endpoint::Point(end)) => diagram.connect(start, end),
                (Endpoint::Node(from), Endpoint::Point(end)) => {
                    let start = lookup(&diagram, &from)?.port(end);
                    diagram.connect(start, end);
                }
                (Endpoint::Point(start), Endpoint::Node(to)) => {
                    let end = lookup(&diagram, &to)?.port(start);
                    diagram.connect(start, end);
                }
            }
        }

        debug!(
            node_count = diagram.node_count(),
            connector_count = diagram.connector_count(),
            "Markup parsed"
        );
        Ok(diagram)
    }
}

fn lookup<'a>(diagram: &'a Diagram, id: &str) -> Result<&'a Node, DiagramError> {
    diagram
        .node(id)
        .ok_or_else(|| DiagramError::unknown_node(id))
}
