//! Permission descriptors, rules, and actors
//!
//! The wire format follows the descriptor JSON stored alongside each
//! resource: `{"inheritLink": "...", "rules": [{"operator": "read",
//! "state": "all", "username": "ming"}, ...]}`. A rule's subject carries
//! exactly one of `username` / `role`; that exactly-one constraint is
//! enforced during deserialization, so any descriptor that parsed is
//! structurally well-formed.

use serde::{Deserialize, Serialize};

/// Sentinel actor id denoting an unauthenticated caller
pub const PUBLIC_ACTOR_ID: &str = "public";

/// The kind of action being authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Change a resource's permission descriptor
    Govern,
    /// Read a resource
    Read,
    /// Modify or delete a resource
    Write,
    /// Create a child resource
    Add,
}

impl Operator {
    /// All four operators; a descriptor with rules and no inherit link
    /// must cover each of these.
    pub const ALL: [Operator; 4] = [
        Operator::Govern,
        Operator::Read,
        Operator::Write,
        Operator::Add,
    ];

    /// Lowercase wire name of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Govern => "govern",
            Operator::Read => "read",
            Operator::Write => "write",
            Operator::Add => "add",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far a rule's grant reaches within its subject scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleState {
    /// Unconditional grant
    #[serde(rename = "all")]
    All,
    /// Grant scoped to the resource's creator
    #[serde(rename = "self")]
    SelfOnly,
    /// No grant
    #[serde(rename = "none")]
    None,
}

/// Audience role a rule may address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Any actor other than the public sentinel
    Authenticated,
    /// The unauthenticated sentinel actor only
    Public,
}

/// A rule's subject: a named user or an audience role, never both
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleSubject {
    /// A specific user, matched by actor id
    User {
        /// The username the rule addresses
        username: String,
    },
    /// An audience role
    Role {
        /// The role the rule addresses
        role: Role,
    },
}

/// One permission rule: operator, state, and subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleWire", into = "RuleWire")]
pub struct Rule {
    /// The action kind this rule speaks to
    pub operator: Operator,
    /// How far the grant reaches
    pub state: RuleState,
    /// Who the rule addresses
    pub subject: RuleSubject,
}

impl Rule {
    /// Rule addressed to a specific user
    pub fn user(operator: Operator, state: RuleState, username: impl Into<String>) -> Self {
        Self {
            operator,
            state,
            subject: RuleSubject::User {
                username: username.into(),
            },
        }
    }

    /// Rule addressed to an audience role
    pub fn role(operator: Operator, state: RuleState, role: Role) -> Self {
        Self {
            operator,
            state,
            subject: RuleSubject::Role { role },
        }
    }
}

/// Flat wire shape of a rule; `username`/`role` are both optional here and
/// the exactly-one check happens in the conversion to [`Rule`].
#[derive(Serialize, Deserialize)]
struct RuleWire {
    operator: Operator,
    state: RuleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

impl TryFrom<RuleWire> for Rule {
    type Error = String;

    fn try_from(wire: RuleWire) -> std::result::Result<Self, Self::Error> {
        let subject = match (wire.username, wire.role) {
            (Some(username), None) => RuleSubject::User { username },
            (None, Some(role)) => RuleSubject::Role { role },
            _ => return Err("rule subject must be exactly one of username or role".to_string()),
        };
        Ok(Rule {
            operator: wire.operator,
            state: wire.state,
            subject,
        })
    }
}

impl From<Rule> for RuleWire {
    fn from(rule: Rule) -> Self {
        let (username, role) = match rule.subject {
            RuleSubject::User { username } => (Some(username), None),
            RuleSubject::Role { role } => (None, Some(role)),
        };
        RuleWire {
            operator: rule.operator,
            state: rule.state,
            username,
            role,
        }
    }
}

/// The stored permission specification for one resource
///
/// At least one of `inherit_link` / `rules` must be present; when
/// `inherit_link` is absent the rules must cover all four operators.
/// Those invariants are checked by `vellum_authorization::validation`,
/// not here — a descriptor value may be structurally valid JSON yet
/// semantically incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PermissionDescriptor {
    /// Locator of the ancestor consulted when this descriptor carries no
    /// explicit rules
    #[serde(rename = "inheritLink", skip_serializing_if = "Option::is_none")]
    pub inherit_link: Option<String>,

    /// Explicit rules; when present (even empty) the descriptor is
    /// terminal and inheritance stops here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

impl PermissionDescriptor {
    /// Descriptor carrying explicit rules and no delegation link
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            inherit_link: None,
            rules: Some(rules),
        }
    }

    /// Pure-delegation descriptor pointing at an ancestor
    pub fn inheriting(link: impl Into<String>) -> Self {
        Self {
            inherit_link: Some(link.into()),
            rules: None,
        }
    }
}

/// The identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Actor id; [`PUBLIC_ACTOR_ID`] denotes an unauthenticated caller
    pub id: String,
}

impl Actor {
    /// Actor with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The unauthenticated sentinel actor
    pub fn public() -> Self {
        Self {
            id: PUBLIC_ACTOR_ID.to_string(),
        }
    }

    /// Whether this is the unauthenticated sentinel
    pub fn is_public(&self) -> bool {
        self.id == PUBLIC_ACTOR_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_deserializes_user_subject() {
        let rule: Rule =
            serde_json::from_str(r#"{"operator":"read","state":"all","username":"ming"}"#).unwrap();
        assert_eq!(rule.operator, Operator::Read);
        assert_eq!(rule.state, RuleState::All);
        assert_eq!(
            rule.subject,
            RuleSubject::User {
                username: "ming".to_string()
            }
        );
    }

    #[test]
    fn rule_deserializes_role_subject() {
        let rule: Rule =
            serde_json::from_str(r#"{"operator":"write","state":"self","role":"authenticated"}"#)
                .unwrap();
        assert_eq!(
            rule.subject,
            RuleSubject::Role {
                role: Role::Authenticated
            }
        );
        assert_eq!(rule.state, RuleState::SelfOnly);
    }

    #[test]
    fn rule_rejects_both_subject_forms() {
        let err = serde_json::from_str::<Rule>(
            r#"{"operator":"read","state":"all","username":"ming","role":"public"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn rule_rejects_missing_subject() {
        assert!(serde_json::from_str::<Rule>(r#"{"operator":"read","state":"all"}"#).is_err());
    }

    #[test]
    fn rule_rejects_unknown_role() {
        assert!(serde_json::from_str::<Rule>(
            r#"{"operator":"read","state":"all","role":"superuser"}"#
        )
        .is_err());
    }

    #[test]
    fn rule_serializes_flat() {
        let rule = Rule::role(Operator::Govern, RuleState::SelfOnly, Role::Authenticated);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"operator":"govern","state":"self","role":"authenticated"})
        );
    }

    #[test]
    fn descriptor_omits_absent_fields() {
        let descriptor = PermissionDescriptor::inheriting("/planets");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json, serde_json::json!({"inheritLink":"/planets"}));
    }

    #[test]
    fn descriptor_wire_field_is_camel_case() {
        let descriptor: PermissionDescriptor =
            serde_json::from_str(r#"{"inheritLink":"https://peer.example/api"}"#).unwrap();
        assert_eq!(
            descriptor.inherit_link.as_deref(),
            Some("https://peer.example/api")
        );
        assert!(descriptor.rules.is_none());
    }

    #[test]
    fn public_actor_sentinel() {
        assert!(Actor::public().is_public());
        assert!(!Actor::new("ming").is_public());
    }
}
