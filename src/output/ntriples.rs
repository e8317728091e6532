//! N-Triples document with a comment header

use crate::graph::Triple;

pub fn render<'a>(title: &str, triples: impl IntoIterator<Item = &'a Triple>) -> String {
    let mut out = format!("# {title}\n");
    for triple in triples {
        out.push_str(&triple.to_ntriples());
        out.push('\n');
    }
    out
}
