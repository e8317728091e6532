//! RDF/XML document envelope
//!
//! One `rdf:Description` per triple, in triple order. Output is pure ASCII:
//! anything else is written as a numeric character reference.

use super::OutputError;
use crate::graph::{Prefixes, Term, Triple};
use std::fmt::Write;

pub fn render<'a>(triples: impl IntoIterator<Item = &'a Triple>, prefixes: &Prefixes) -> Result<String, OutputError> {
    let mut out = String::new();
    header(&mut out, prefixes);
    for triple in triples {
        description(&mut out, triple, prefixes)?;
    }
    out.push_str("</rdf:RDF>\n");
    Ok(out)
}

fn header(out: &mut String, prefixes: &Prefixes) {
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF");
    for (prefix, namespace) in prefixes.iter() {
        let _ = write!(out, "\n    xmlns:{}=\"{}\"", prefix, xml_escape(namespace));
    }
    out.push_str(">\n");
}

fn description(out: &mut String, triple: &Triple, prefixes: &Prefixes) -> Result<(), OutputError> {
    let predicate = triple.predicate.as_str();
    let (qname, declaration) = match prefixes.compact(predicate) {
        Some((prefix, local)) => (format!("{prefix}:{local}"), String::new()),
        None => {
            let (namespace, local) =
                split_predicate(predicate).ok_or_else(|| OutputError::Predicate(predicate.to_string()))?;
            (
                format!("ns0:{local}"),
                format!(" xmlns:ns0=\"{}\"", xml_escape(namespace)),
            )
        }
    };

    let _ = writeln!(
        out,
        "<rdf:Description rdf:about=\"{}\">",
        xml_escape(triple.subject.as_str())
    );
    match &triple.object {
        Term::Iri(iri) => {
            let _ = writeln!(
                out,
                "    <{qname}{declaration} rdf:resource=\"{}\"/>",
                xml_escape(iri.as_str())
            );
        }
        Term::Literal(lit) => {
            let mut attrs = declaration;
            if let Some(datatype) = &lit.datatype {
                let _ = write!(attrs, " rdf:datatype=\"{}\"", xml_escape(datatype.as_str()));
            }
            if let Some(language) = &lit.language {
                let _ = write!(attrs, " xml:lang=\"{}\"", xml_escape(language));
            }
            let _ = writeln!(out, "    <{qname}{attrs}>{}</{qname}>", xml_escape(&lit.lexical));
        }
    }
    out.push_str("</rdf:Description>\n");
    Ok(())
}

/// Split an IRI after its last `#` or `/` when the rest is an XML name
fn split_predicate(iri: &str) -> Option<(&str, &str)> {
    let at = iri.rfind(['#', '/'])? + 1;
    let (namespace, local) = iri.split_at(at);
    let mut chars = local.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    valid.then_some((namespace, local))
}

/// Escape for element content and attribute values. Characters XML 1.0
/// cannot carry, even as references, are dropped.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' | '\n' => out.push(c),
            '\r' => out.push_str("&#13;"),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if c.is_ascii() => out.push(c),
            c => {
                let _ = write!(out, "&#{};", c as u32);
            }
        }
    }
    out
}
