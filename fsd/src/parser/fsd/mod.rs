use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use log::debug;

use crate::model::{
    is_valid_name, Dto, Enum, EnumValue, ErrorSet, ErrorValue, Field, Member, Method, Position,
    RemarksSection, Service, ServiceBuilder,
};
use crate::parser::error::Error;
use crate::parser::fsd::attributes::attributes;
use crate::parser::fsd::comment::{summary, ws};
use crate::parser::{error, util, LineIndex, Source};
use crate::{DefinitionError, Result};

mod attributes;
mod comment;

/// Parses FSD text into a [Service].
///
/// The grammar is document oriented: an optional doc comment and
/// attribute brackets, a `service Name { ... }` block containing
/// `method`/`data`/`enum`/`errors` members, and optional trailing
/// `# Name` remarks sections.
#[derive(Default)]
pub struct Fsd {}

impl crate::parser::Parser for Fsd {
    fn parse(&self, source: &Source) -> Result<Service> {
        debug!("parsing FSD document '{}'", source.name);
        let lines = LineIndex::new(&source.text);
        let ctx = Context {
            document: &source.name,
            lines: &lines,
        };

        let ((((service_summary, service_attributes), (name, position)), members), remainder) =
            service(ctx)
                .parse(source.text.as_str())
                .into_result()
                .map_err(|errors| error::first_error(source, &lines, errors))?;

        let mut builder = ServiceBuilder::new(name, position);
        builder.summary(service_summary);
        for attribute in service_attributes {
            builder.add_attribute(attribute);
        }
        for member in members {
            builder.add_member(member);
        }
        let (remarks_text, remarks_offset) = remainder;
        for section in parse_remarks(ctx, remarks_text, remarks_offset)? {
            builder.add_remarks(section);
        }
        builder.build()
    }
}

/// Shared per-parse state: the document name and its line index, used to
/// turn chumsky byte spans into [Position]s.
#[derive(Copy, Clone)]
pub(crate) struct Context<'a> {
    pub(crate) document: &'a str,
    pub(crate) lines: &'a LineIndex,
}

impl Context<'_> {
    fn position(&self, offset: usize) -> Position {
        self.lines.position(self.document, offset)
    }
}

/// Attaches the position of the parsed value's span start.
pub(crate) fn positioned<'a, T>(
    ctx: Context<'a>,
    parser: impl Parser<'a, &'a str, T, Error<'a>> + Clone,
) -> impl Parser<'a, &'a str, (T, Position), Error<'a>> + Clone {
    parser.try_map(move |value, span: SimpleSpan| Ok((value, ctx.position(span.start))))
}

type RawService<'a> = (
    (((String, Vec<crate::model::Attribute>), (&'a str, Position)), Vec<Member>),
    (&'a str, usize),
);

fn service<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, RawService<'a>, Error<'a>> {
    let remainder = any()
        .repeated()
        .slice()
        .try_map(|s: &str, span: SimpleSpan| Ok((s, span.start)));
    summary()
        .then(attributes(ctx))
        .then_ignore(kw("service"))
        .then(name(ctx))
        .then(
            member(ctx)
                .repeated()
                .collect::<Vec<_>>()
                .delimited_by(ws().ignore_then(just('{')), ws().ignore_then(just('}'))),
        )
        .then(remainder)
        .then_ignore(end())
}

fn kw<'a>(keyword: &'a str) -> impl Parser<'a, &'a str, &'a str, Error<'a>> + Clone {
    ws().ignore_then(util::keyword_ex(keyword))
}

fn name<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, (&'a str, Position), Error<'a>> + Clone {
    ws().ignore_then(positioned(ctx, text::ident()))
}

fn member<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Member, Error<'a>> + Clone {
    summary()
        .then(attributes(ctx))
        .then(choice((method(ctx), data(ctx), en(ctx), errors(ctx))))
        .map(|((summary, attributes), mut member)| {
            match &mut member {
                Member::Method(m) => {
                    m.summary = summary;
                    m.attributes = attributes;
                }
                Member::Dto(d) => {
                    d.summary = summary;
                    d.attributes = attributes;
                }
                Member::Enum(e) => {
                    e.summary = summary;
                    e.attributes = attributes;
                }
                Member::ErrorSet(e) => {
                    e.summary = summary;
                    e.attributes = attributes;
                }
            }
            member
        })
}

fn method<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Member, Error<'a>> + Clone {
    kw("method")
        .ignore_then(name(ctx))
        .then(field_block(ctx))
        .then_ignore(ws().ignore_then(just(':')))
        .then(field_block(ctx))
        .map(|(((name, position), request), response)| {
            Member::Method(Method {
                name: name.to_string(),
                request,
                response,
                position,
                ..Default::default()
            })
        })
}

fn data<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Member, Error<'a>> + Clone {
    kw("data")
        .ignore_then(name(ctx))
        .then(field_block(ctx))
        .map(|((name, position), fields)| {
            Member::Dto(Dto {
                name: name.to_string(),
                fields,
                position,
                ..Default::default()
            })
        })
}

fn en<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Member, Error<'a>> + Clone {
    let value = summary()
        .then(attributes(ctx))
        .then(name(ctx))
        .map(|((summary, attributes), (name, position))| EnumValue {
            name: name.to_string(),
            attributes,
            summary,
            position,
        });
    kw("enum")
        .ignore_then(name(ctx))
        .then(value_block(value))
        .map(|((name, position), values)| {
            Member::Enum(Enum {
                name: name.to_string(),
                values,
                position,
                ..Default::default()
            })
        })
}

fn errors<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Member, Error<'a>> + Clone {
    let value = summary()
        .then(attributes(ctx))
        .then(name(ctx))
        .map(|((summary, attributes), (name, position))| ErrorValue {
            name: name.to_string(),
            attributes,
            summary,
            position,
        });
    kw("errors")
        .ignore_then(name(ctx))
        .then(value_block(value))
        .map(|((name, position), errors)| {
            Member::ErrorSet(ErrorSet {
                name: name.to_string(),
                errors,
                position,
                ..Default::default()
            })
        })
}

fn field<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Field, Error<'a>> + Clone {
    summary()
        .then(attributes(ctx))
        .then(name(ctx))
        .then_ignore(ws().ignore_then(just(':')))
        .then(ws().ignore_then(type_expr()))
        .then_ignore(ws().ignore_then(just(';')))
        .map(|(((summary, attributes), (name, position)), type_name)| Field {
            name: name.to_string(),
            type_name: type_name.to_string(),
            attributes,
            summary,
            position,
        })
}

fn field_block<'a>(ctx: Context<'a>) -> impl Parser<'a, &'a str, Vec<Field>, Error<'a>> + Clone {
    field(ctx)
        .repeated()
        .collect::<Vec<_>>()
        .delimited_by(ws().ignore_then(just('{')), ws().ignore_then(just('}')))
}

fn value_block<'a, T>(
    value: impl Parser<'a, &'a str, T, Error<'a>> + Clone,
) -> impl Parser<'a, &'a str, Vec<T>, Error<'a>> + Clone {
    value
        .separated_by(ws().ignore_then(just(',')))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(ws().ignore_then(just('{')), ws().ignore_then(just('}')))
}

/// The textual type expression of a field, stored as written and resolved
/// later against the service registry.
fn type_expr<'a>() -> impl Parser<'a, &'a str, &'a str, Error<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || "_<>[]".contains(*c))
        .repeated()
        .at_least(1)
        .slice()
}

/// Splits the text after the service body into `# Name` remarks sections.
/// Lines belong to the most recent heading; blank edges are trimmed.
fn parse_remarks(
    ctx: Context<'_>,
    text: &str,
    start_offset: usize,
) -> Result<Vec<RemarksSection>> {
    let mut sections: Vec<RemarksSection> = Vec::new();
    let mut offset = start_offset;
    for raw_line in text.split('\n') {
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();
        if let Some(heading) = trimmed.strip_prefix('#') {
            let name = heading.trim().to_string();
            let indent = line.len() - line.trim_start().len();
            let position = ctx.position(offset + indent);
            if !is_valid_name(&name) {
                return Err(DefinitionError::new(
                    format!("invalid remarks heading '{}'", trimmed),
                    position,
                ));
            }
            sections.push(RemarksSection {
                name,
                lines: Vec::new(),
                position,
            });
        } else if let Some(section) = sections.last_mut() {
            section.lines.push(line.to_string());
        } else if !trimmed.is_empty() {
            return Err(DefinitionError::new(
                "expected remarks heading",
                ctx.position(offset),
            ));
        }
        offset += raw_line.len() + 1;
    }
    for section in &mut sections {
        while section.lines.first().map_or(false, |l| l.trim().is_empty()) {
            section.lines.remove(0);
        }
        while section.lines.last().map_or(false, |l| l.trim().is_empty()) {
            section.lines.pop();
        }
    }
    Ok(sections)
}
