//! SPARQL endpoint store
//!
//! Evaluates queries against a live endpoint over HTTP. Each lookup is one
//! blocking request/response; there is no retry.

use super::mint::{IdentifierMinter, MintStrategy};
use super::traits::{GraphStore, StorageError, StorageResult};
use crate::graph::{Iri, Literal, Term};
use crate::query::{EntityQuery, UsageQuery, ValueQuery};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// Connection settings for a SPARQL endpoint
#[derive(Clone)]
pub struct EndpointSettings {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for EndpointSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct SparqlEndpoint {
    client: Client,
    settings: EndpointSettings,
    minter: IdentifierMinter,
}

impl fmt::Debug for SparqlEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparqlEndpoint")
            .field("settings", &self.settings)
            .finish()
    }
}

impl SparqlEndpoint {
    pub fn new(settings: EndpointSettings, namespace: &str) -> StorageResult<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            settings,
            minter: IdentifierMinter::new(namespace, MintStrategy::Random),
        })
    }

    fn execute(&self, sparql: &str) -> StorageResult<SparqlResults> {
        debug!(endpoint = %self.settings.url, query = %sparql, "sparql request");
        let mut request = self
            .client
            .post(&self.settings.url)
            .header(ACCEPT, RESULTS_JSON)
            .form(&[("query", sparql)]);
        if let Some(ref username) = self.settings.username {
            request = request.basic_auth(username, self.settings.password.as_ref());
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StorageError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }
        let text = response.text()?;
        SparqlResults::parse(&text)
    }
}

impl GraphStore for SparqlEndpoint {
    fn find_entity(&self, query: &EntityQuery) -> StorageResult<Option<Iri>> {
        let results = self.execute(&query.to_sparql()?)?;
        Ok(results
            .column("uri")
            .into_iter()
            .find_map(|term| term.as_iri().cloned()))
    }

    fn values(&self, query: &ValueQuery) -> StorageResult<Vec<Term>> {
        let results = self.execute(&query.to_sparql()?)?;
        Ok(results.column("o"))
    }

    fn is_in_use(&self, iri: &Iri) -> StorageResult<bool> {
        let results = self.execute(&UsageQuery::new(iri.clone()).to_sparql()?)?;
        results
            .boolean
            .ok_or_else(|| StorageError::InvalidResponse("ASK query returned no boolean".into()))
    }

    fn mint_identifier(&self) -> StorageResult<Iri> {
        self.minter.mint(|iri| self.is_in_use(iri))
    }
}

/// `application/sparql-results+json` document
#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    results: Option<ResultBindings>,
    #[serde(default)]
    boolean: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ResultBindings {
    bindings: Vec<HashMap<String, BindingValue>>,
}

#[derive(Debug, Deserialize)]
struct BindingValue {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    datatype: Option<String>,
    #[serde(rename = "xml:lang", default)]
    lang: Option<String>,
}

impl SparqlResults {
    fn parse(text: &str) -> StorageResult<Self> {
        serde_json::from_str(text).map_err(|e| StorageError::InvalidResponse(e.to_string()))
    }

    /// Terms bound to `var` in solution order; blank nodes are dropped
    fn column(&self, var: &str) -> Vec<Term> {
        let Some(ref results) = self.results else {
            return Vec::new();
        };
        results
            .bindings
            .iter()
            .filter_map(|solution| solution.get(var))
            .filter_map(BindingValue::to_term)
            .collect()
    }
}

impl BindingValue {
    fn to_term(&self) -> Option<Term> {
        match self.kind.as_str() {
            "uri" => Some(Term::Iri(Iri::new(self.value.clone()))),
            "literal" | "typed-literal" => Some(Term::Literal(Literal {
                lexical: self.value.clone(),
                datatype: self.datatype.clone().map(Iri::new),
                language: self.lang.clone(),
            })),
            _ => None,
        }
    }
}
