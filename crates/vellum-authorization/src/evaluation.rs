//! Rule evaluation: filter, then any-match-wins
//!
//! Evaluation is two steps. First keep the rules that speak to this
//! operator and could address this actor: a `User` rule must name the
//! actor's id, while role rules pass the filter for every actor — the
//! role-specific check happens in the grant step. Then grant if *any*
//! surviving rule grants. There is no rule ordering, no first-match
//! short-circuit, and no explicit-deny override: a `none` rule never
//! grants and, equally, cannot revoke a grant produced by a separate
//! matching rule.

use vellum_core::{Actor, Operator, Role, Rule, RuleState, RuleSubject};

/// Decide whether `actor` holds `operator` under the resolved rule set.
pub fn evaluate(operator: Operator, rules: &[Rule], creator: &str, actor: &Actor) -> bool {
    rules
        .iter()
        .filter(|rule| rule.operator == operator && addresses(rule, actor))
        .any(|rule| grants(rule, creator, actor))
}

fn addresses(rule: &Rule, actor: &Actor) -> bool {
    match &rule.subject {
        RuleSubject::User { username } => *username == actor.id,
        RuleSubject::Role { .. } => true,
    }
}

fn grants(rule: &Rule, creator: &str, actor: &Actor) -> bool {
    match &rule.subject {
        RuleSubject::User { .. } => match rule.state {
            RuleState::All => true,
            RuleState::SelfOnly => actor.id == creator,
            RuleState::None => false,
        },
        RuleSubject::Role {
            role: Role::Authenticated,
        } => {
            !actor.is_public()
                && match rule.state {
                    RuleState::All => true,
                    RuleState::SelfOnly => actor.id == creator,
                    RuleState::None => false,
                }
        }
        RuleSubject::Role { role: Role::Public } => {
            // For a public-audience rule, `self` grants without
            // consulting the creator; an anonymous audience has no
            // meaningful creator relationship. Deliberately asymmetric
            // with the authenticated branch.
            actor.is_public() && matches!(rule.state, RuleState::All | RuleState::SelfOnly)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATOR: &str = "ming";

    fn ming() -> Actor {
        Actor::new("ming")
    }

    fn flash() -> Actor {
        Actor::new("flash")
    }

    #[test]
    fn user_all_grants_regardless_of_creator() {
        let rules = vec![Rule::user(Operator::Read, RuleState::All, "flash")];
        assert!(evaluate(Operator::Read, &rules, CREATOR, &flash()));
    }

    #[test]
    fn user_self_grants_only_creator() {
        let rules = vec![
            Rule::user(Operator::Write, RuleState::SelfOnly, "ming"),
            Rule::user(Operator::Write, RuleState::SelfOnly, "flash"),
        ];
        assert!(evaluate(Operator::Write, &rules, CREATOR, &ming()));
        assert!(!evaluate(Operator::Write, &rules, CREATOR, &flash()));
    }

    #[test]
    fn user_rule_for_someone_else_never_applies() {
        let rules = vec![Rule::user(Operator::Read, RuleState::All, "ming")];
        assert!(!evaluate(Operator::Read, &rules, CREATOR, &flash()));
    }

    #[test]
    fn operator_mismatch_never_applies() {
        let rules = vec![Rule::user(Operator::Read, RuleState::All, "flash")];
        assert!(!evaluate(Operator::Write, &rules, CREATOR, &flash()));
    }

    #[test]
    fn authenticated_role_skips_public_actor() {
        let rules = vec![Rule::role(Operator::Read, RuleState::All, Role::Authenticated)];
        assert!(evaluate(Operator::Read, &rules, CREATOR, &flash()));
        assert!(!evaluate(Operator::Read, &rules, CREATOR, &Actor::public()));
    }

    #[test]
    fn authenticated_self_checks_creator() {
        let rules = vec![Rule::role(
            Operator::Write,
            RuleState::SelfOnly,
            Role::Authenticated,
        )];
        assert!(evaluate(Operator::Write, &rules, CREATOR, &ming()));
        assert!(!evaluate(Operator::Write, &rules, CREATOR, &flash()));
    }

    #[test]
    fn public_role_skips_authenticated_actor() {
        let rules = vec![Rule::role(Operator::Read, RuleState::All, Role::Public)];
        assert!(evaluate(Operator::Read, &rules, CREATOR, &Actor::public()));
        assert!(!evaluate(Operator::Read, &rules, CREATOR, &flash()));
    }

    #[test]
    fn public_self_rule_grants_without_creator_check() {
        // The public/self asymmetry: unlike the user and authenticated
        // branches, `self` here does not compare against the creator.
        let rules = vec![Rule::role(Operator::Read, RuleState::SelfOnly, Role::Public)];
        assert!(evaluate(Operator::Read, &rules, CREATOR, &Actor::public()));
    }

    #[test]
    fn none_state_never_grants() {
        let rules = vec![
            Rule::user(Operator::Read, RuleState::None, "flash"),
            Rule::role(Operator::Read, RuleState::None, Role::Authenticated),
            Rule::role(Operator::Read, RuleState::None, Role::Public),
        ];
        assert!(!evaluate(Operator::Read, &rules, CREATOR, &flash()));
        assert!(!evaluate(Operator::Read, &rules, CREATOR, &Actor::public()));
    }

    #[test]
    fn none_rule_does_not_revoke_separate_grant() {
        let rules = vec![
            Rule::user(Operator::Read, RuleState::None, "flash"),
            Rule::role(Operator::Read, RuleState::All, Role::Authenticated),
        ];
        assert!(evaluate(Operator::Read, &rules, CREATOR, &flash()));
    }

    #[test]
    fn empty_rule_set_denies() {
        assert!(!evaluate(Operator::Read, &[], CREATOR, &flash()));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_operator() -> impl Strategy<Value = Operator> {
            prop_oneof![
                Just(Operator::Govern),
                Just(Operator::Read),
                Just(Operator::Write),
                Just(Operator::Add),
            ]
        }

        fn arb_state() -> impl Strategy<Value = RuleState> {
            prop_oneof![
                Just(RuleState::All),
                Just(RuleState::SelfOnly),
                Just(RuleState::None),
            ]
        }

        fn arb_subject() -> impl Strategy<Value = RuleSubject> {
            prop_oneof![
                prop_oneof![Just("ming"), Just("flash"), Just("aura")].prop_map(|name| {
                    RuleSubject::User {
                        username: name.to_string(),
                    }
                }),
                Just(RuleSubject::Role {
                    role: Role::Authenticated
                }),
                Just(RuleSubject::Role { role: Role::Public }),
            ]
        }

        fn arb_rule() -> impl Strategy<Value = Rule> {
            (arb_operator(), arb_state(), arb_subject()).prop_map(|(operator, state, subject)| {
                Rule {
                    operator,
                    state,
                    subject,
                }
            })
        }

        fn arb_actor() -> impl Strategy<Value = Actor> {
            prop_oneof![
                Just(Actor::new("ming")),
                Just(Actor::new("flash")),
                Just(Actor::public()),
            ]
        }

        proptest! {
            // Any-match-wins is monotone: adding rules can only widen
            // access, never revoke it.
            #[test]
            fn adding_rules_never_revokes(
                base in proptest::collection::vec(arb_rule(), 0..6),
                extra in proptest::collection::vec(arb_rule(), 0..6),
                operator in arb_operator(),
                actor in arb_actor(),
            ) {
                let before = evaluate(operator, &base, "ming", &actor);
                let mut widened = base;
                widened.extend(extra);
                if before {
                    prop_assert!(evaluate(operator, &widened, "ming", &actor));
                }
            }

            // A none-state rule on its own never produces a grant.
            #[test]
            fn none_rules_alone_never_grant(
                mut rules in proptest::collection::vec(arb_rule(), 0..6),
                operator in arb_operator(),
                actor in arb_actor(),
            ) {
                for rule in &mut rules {
                    rule.state = RuleState::None;
                }
                prop_assert!(!evaluate(operator, &rules, "ming", &actor));
            }
        }
    }
}
