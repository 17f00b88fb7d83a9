//! Request types - The shape of a dependency request site
//!
//! A request names a [`Key`] and how the dependent wants to receive it. Only one
//! distinction matters to a binding graph: members-injection requests are answered
//! from the members-injection table, everything else from the contribution table.

use crate::key::Key;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a dependency is requested at a request site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// `T`
    Instance,
    /// `Provider<T>`
    Provider,
    /// `Lazy<T>`
    Lazy,
    /// `Provider<Lazy<T>>`
    ProviderOfLazy,
    /// Populate the fields of an existing `T`
    MembersInjection,
    /// `Producer<T>`
    Producer,
    /// `Produced<T>`
    Produced,
    /// `Future<T>`
    Future,
}

/// The two binding tables held by every graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingTable {
    Contribution,
    MembersInjection,
}

impl RequestKind {
    /// Get the string representation of the request kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Instance => "instance",
            RequestKind::Provider => "provider",
            RequestKind::Lazy => "lazy",
            RequestKind::ProviderOfLazy => "provider_of_lazy",
            RequestKind::MembersInjection => "members_injection",
            RequestKind::Producer => "producer",
            RequestKind::Produced => "produced",
            RequestKind::Future => "future",
        }
    }

    /// Get all request kinds
    pub fn all() -> &'static [RequestKind] {
        &[
            RequestKind::Instance,
            RequestKind::Provider,
            RequestKind::Lazy,
            RequestKind::ProviderOfLazy,
            RequestKind::MembersInjection,
            RequestKind::Producer,
            RequestKind::Produced,
            RequestKind::Future,
        ]
    }

    /// The table that answers requests of this kind.
    pub fn table(&self) -> BindingTable {
        match self {
            RequestKind::MembersInjection => BindingTable::MembersInjection,
            RequestKind::Instance
            | RequestKind::Provider
            | RequestKind::Lazy
            | RequestKind::ProviderOfLazy
            | RequestKind::Producer
            | RequestKind::Produced
            | RequestKind::Future => BindingTable::Contribution,
        }
    }

    pub fn is_members_injection(&self) -> bool {
        self.table() == BindingTable::MembersInjection
    }
}

impl FromStr for RequestKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instance" | "direct" | "t" => Ok(RequestKind::Instance),
            "provider" | "provider<t>" => Ok(RequestKind::Provider),
            "lazy" | "lazy<t>" => Ok(RequestKind::Lazy),
            "provider_of_lazy" | "provider<lazy>" | "provider<lazy<t>>" => {
                Ok(RequestKind::ProviderOfLazy)
            }
            "members_injection" | "members" | "inject" => Ok(RequestKind::MembersInjection),
            "producer" | "producer<t>" => Ok(RequestKind::Producer),
            "produced" | "produced<t>" => Ok(RequestKind::Produced),
            "future" | "future<t>" => Ok(RequestKind::Future),
            _ => Err(crate::Error::UnknownRequestKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingTable::Contribution => write!(f, "contribution"),
            BindingTable::MembersInjection => write!(f, "members-injection"),
        }
    }
}

/// A lookup token: which key, requested how.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingRequest {
    key: Key,
    kind: RequestKind,
}

impl BindingRequest {
    pub fn new(key: Key, kind: RequestKind) -> Self {
        Self { key, kind }
    }

    /// A plain instance request for `key`
    pub fn instance(key: Key) -> Self {
        Self::new(key, RequestKind::Instance)
    }

    /// A members-injection request for `key`
    pub fn members_injection(key: Key) -> Self {
        Self::new(key, RequestKind::MembersInjection)
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn is_request_kind(&self, kind: RequestKind) -> bool {
        self.kind == kind
    }

    pub fn is_members_injection(&self) -> bool {
        self.kind.is_members_injection()
    }

    /// The table this request is answered from
    pub fn table(&self) -> BindingTable {
        self.kind.table()
    }
}

impl std::fmt::Display for BindingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key, self.kind)
    }
}
