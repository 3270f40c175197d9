//! Settlement resolution
//!
//! Turns net balances into pairwise transfers with a greedy two-pointer walk
//! over debtors and creditors, each sorted by magnitude. The result is a
//! valid set of transfers, not a minimum-transfer one, and the order of the
//! walk is part of the output contract: the same balances always produce the
//! same transfers in the same order.

use serde::{Deserialize, Serialize};

use super::balance::Balances;
use crate::models::{Amount, MemberId, CENT};

/// A remaining balance below this is treated as settled
pub const SETTLEMENT_EPSILON: f64 = CENT;

/// An amount owed, relative to an observing member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// The other side of the debt
    #[serde(rename = "userId")]
    pub counterparty_id: MemberId,
    /// Always positive
    pub amount: Amount,
}

impl Debt {
    pub fn new(counterparty_id: MemberId, amount: Amount) -> Self {
        Self {
            counterparty_id,
            amount,
        }
    }
}

/// One directed transfer that moves a debtor and a creditor toward zero
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub debtor: MemberId,
    pub creditor: MemberId,
    pub amount: Amount,
}

/// The part of a group's settlement that touches one member
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObserverDebts {
    /// Debtors who owe the observer
    pub owed_by_others: Vec<Debt>,
    /// Creditors the observer owes
    pub owed_to_others: Vec<Debt>,
}

#[derive(Debug)]
struct Position<'a> {
    member: &'a MemberId,
    remaining: f64,
}

/// Split balances into debtors and creditors, both sorted by magnitude
/// descending and then by member id.
fn partition(balances: &Balances) -> (Vec<Position<'_>>, Vec<Position<'_>>) {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (member, balance) in balances {
        let rounded = balance.round_cents();
        if rounded.is_negative() {
            debtors.push(Position {
                member,
                remaining: rounded.abs().value(),
            });
        } else if rounded.is_positive() {
            creditors.push(Position {
                member,
                remaining: rounded.value(),
            });
        }
    }

    let by_magnitude = |a: &Position<'_>, b: &Position<'_>| {
        b.remaining
            .total_cmp(&a.remaining)
            .then_with(|| a.member.cmp(b.member))
    };
    debtors.sort_by(by_magnitude);
    creditors.sort_by(by_magnitude);

    (debtors, creditors)
}

/// Match debtors to creditors greedily, largest first
pub fn settlement_plan(balances: &Balances) -> Vec<Settlement> {
    let (mut debtors, mut creditors) = partition(balances);
    let mut plan = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].remaining.min(creditors[j].remaining);

        plan.push(Settlement {
            debtor: debtors[i].member.clone(),
            creditor: creditors[j].member.clone(),
            amount: Amount::new(amount).round_cents(),
        });

        debtors[i].remaining -= amount;
        creditors[j].remaining -= amount;

        if debtors[i].remaining < SETTLEMENT_EPSILON {
            i += 1;
        }
        if creditors[j].remaining < SETTLEMENT_EPSILON {
            j += 1;
        }
    }

    plan
}

/// Resolve what the observer owes and is owed within one group
pub fn resolve_debts(balances: &Balances, observer: &MemberId) -> ObserverDebts {
    let mut debts = ObserverDebts::default();

    for settlement in settlement_plan(balances) {
        if &settlement.debtor == observer {
            debts
                .owed_to_others
                .push(Debt::new(settlement.creditor, settlement.amount));
        } else if &settlement.creditor == observer {
            debts
                .owed_by_others
                .push(Debt::new(settlement.debtor, settlement.amount));
        }
    }

    debts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(id: &str) -> MemberId {
        MemberId::from(id)
    }

    fn balances(entries: &[(&str, f64)]) -> Balances {
        entries
            .iter()
            .map(|(id, value)| (m(id), Amount::new(*value)))
            .collect()
    }

    fn debt(id: &str, amount: f64) -> Debt {
        Debt::new(m(id), Amount::new(amount))
    }

    fn plan_tuples(plan: &[Settlement]) -> Vec<(&str, &str, f64)> {
        plan.iter()
            .map(|s| (s.debtor.as_str(), s.creditor.as_str(), s.amount.value()))
            .collect()
    }

    #[test]
    fn test_drifted_remainder_below_epsilon_is_dropped() {
        // 0.03 - 0.02 is 0.009999999999999998 in f64, so x counts as settled
        // before z is reached
        let b = balances(&[("x", 0.03), ("y", -0.02), ("z", -0.01)]);
        let plan = settlement_plan(&b);

        assert_eq!(plan_tuples(&plan), vec![("y", "x", 0.02)]);
        assert!(resolve_debts(&b, &m("z")).owed_to_others.is_empty());
    }

    #[test]
    fn test_two_member_debt() {
        let b = balances(&[("x", 50.0), ("y", -50.0)]);

        let y_view = resolve_debts(&b, &m("y"));
        assert_eq!(y_view.owed_to_others, vec![debt("x", 50.0)]);
        assert!(y_view.owed_by_others.is_empty());

        let x_view = resolve_debts(&b, &m("x"));
        assert_eq!(x_view.owed_by_others, vec![debt("y", 50.0)]);
        assert!(x_view.owed_to_others.is_empty());
    }

    #[test]
    fn test_settled_balances_produce_nothing() {
        let b = balances(&[("x", 0.0), ("y", 0.0)]);
        assert!(settlement_plan(&b).is_empty());
        assert_eq!(resolve_debts(&b, &m("x")), ObserverDebts::default());
    }

    #[test]
    fn test_largest_debtor_first() {
        let b = balances(&[("x", 50.0), ("y", -10.0), ("z", -40.0)]);
        let x_view = resolve_debts(&b, &m("x"));
        assert_eq!(x_view.owed_by_others, vec![debt("z", 40.0), debt("y", 10.0)]);
    }

    #[test]
    fn test_ties_broken_by_member_id() {
        let b = balances(&[("c", 50.0), ("b", -25.0), ("a", -25.0)]);
        assert_eq!(
            plan_tuples(&settlement_plan(&b)),
            vec![("a", "c", 25.0), ("b", "c", 25.0)]
        );
    }

    #[test]
    fn test_greedy_walk_is_not_minimal() {
        // a->y, b->x, c->x would settle in three transfers; the greedy walk
        // takes four and that is the behaviour callers see.
        let b = balances(&[("a", -4.0), ("b", -3.0), ("c", -3.0), ("x", 6.0), ("y", 4.0)]);
        assert_eq!(
            plan_tuples(&settlement_plan(&b)),
            vec![
                ("a", "x", 4.0),
                ("b", "x", 2.0),
                ("b", "y", 1.0),
                ("c", "y", 3.0),
            ]
        );
    }

    #[test]
    fn test_sub_cent_noise_is_ignored() {
        let b = balances(&[("x", 0.004), ("y", -0.004)]);
        assert!(settlement_plan(&b).is_empty());
    }

    #[test]
    fn test_thirds_round_to_cents() {
        // 100 paid by c, split three ways
        let third = 100.0 / 3.0;
        let b = balances(&[("a", -third), ("b", -third), ("c", 100.0 - third)]);

        let c_view = resolve_debts(&b, &m("c"));
        assert_eq!(c_view.owed_by_others, vec![debt("a", 33.33), debt("b", 33.33)]);

        let a_view = resolve_debts(&b, &m("a"));
        assert_eq!(a_view.owed_to_others, vec![debt("c", 33.33)]);
    }

    #[test]
    fn test_observer_outside_plan_sees_nothing() {
        let b = balances(&[("x", 50.0), ("y", -50.0), ("z", 0.0)]);
        assert_eq!(resolve_debts(&b, &m("z")), ObserverDebts::default());
        assert_eq!(resolve_debts(&b, &m("stranger")), ObserverDebts::default());
    }

    #[test]
    fn test_observer_can_owe_several_creditors() {
        let b = balances(&[("x", 30.0), ("y", 20.0), ("z", -50.0)]);
        let z_view = resolve_debts(&b, &m("z"));
        assert_eq!(z_view.owed_to_others, vec![debt("x", 30.0), debt("y", 20.0)]);
    }

    #[test]
    fn test_pairwise_amounts_are_symmetric() {
        let b = balances(&[("a", -4.0), ("b", -3.0), ("c", -3.0), ("x", 6.0), ("y", 4.0)]);
        for s in settlement_plan(&b) {
            let debtor_view = resolve_debts(&b, &s.debtor);
            let creditor_view = resolve_debts(&b, &s.creditor);
            assert!(debtor_view
                .owed_to_others
                .contains(&Debt::new(s.creditor.clone(), s.amount)));
            assert!(creditor_view
                .owed_by_others
                .contains(&Debt::new(s.debtor.clone(), s.amount)));
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let b = balances(&[("d", -7.5), ("a", -7.5), ("m", 10.0), ("k", 5.0)]);
        let first = settlement_plan(&b);
        for _ in 0..10 {
            assert_eq!(settlement_plan(&b), first);
        }
    }

    #[test]
    fn test_debt_serializes_with_user_id() {
        let json = serde_json::to_value(debt("ana", 12.5)).unwrap();
        assert_eq!(json["userId"], "ana");
        assert_eq!(json["amount"], 12.5);
    }
}
