// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use blindquote_app::{
    AccessoryKind, Axis, ChannelQuantities, ChannelType, CountedAccessory, PriceKey, QuoteCommand,
    QuoteSession,
};
use proptest::prelude::*;

fn arb_dimension() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => (1.0..3000.0_f64).prop_map(f64::round),
        1 => Just(0.0),
        1 => Just(-250.0),
        1 => Just(f64::NAN),
    ]
}

fn arb_counted() -> impl Strategy<Value = CountedAccessory> {
    prop::sample::select(CountedAccessory::ALL.to_vec())
}

fn arb_command() -> impl Strategy<Value = QuoteCommand> {
    let index = 0..8_usize;
    prop_oneof![
        4 => Just(QuoteCommand::AddRow),
        1 => index.clone().prop_map(QuoteCommand::RemoveRow),
        1 => index.clone().prop_map(QuoteCommand::InsertRowAfter),
        1 => index.clone().prop_map(QuoteCommand::ClearRow),
        4 => (index.clone(), arb_dimension()).prop_map(|(index, value)| {
            QuoteCommand::SetDimension { index, axis: Axis::Width, value }
        }),
        4 => (index.clone(), arb_dimension()).prop_map(|(index, value)| {
            QuoteCommand::SetDimension { index, axis: Axis::Height, value }
        }),
        2 => Just(QuoteCommand::EnterDualSelection),
        3 => index.clone().prop_map(QuoteCommand::ToggleDualRow),
        2 => Just(QuoteCommand::ExitDualSelection),
        1 => arb_counted().prop_map(QuoteCommand::EnterCounter),
        1 => Just(QuoteCommand::IncrementCounter),
        1 => Just(QuoteCommand::DecrementCounter),
        1 => Just(QuoteCommand::ExitCounter),
        2 => (arb_counted(), 0..10_u32)
            .prop_map(|(kind, value)| QuoteCommand::SetCount { kind, value }),
        2 => (0..6_u32, 0..6_u32).prop_map(|(one, sixteen)| {
            QuoteCommand::CommitDistribution(ChannelQuantities::from([
                (ChannelType::OneChannel, one),
                (ChannelType::SixteenChannel, sixteen),
            ]))
        }),
        1 => Just(QuoteCommand::SyncDriveCounts),
        1 => Just(QuoteCommand::ClearLedger),
    ]
}

fn marked_valid_rows(session: &QuoteSession) -> usize {
    session
        .ledger()
        .rows()
        .iter()
        .filter(|row| {
            row.dual_marked
                && row.width.is_some_and(|width| width > 0.0)
                && row.height.is_some_and(|height| height > 0.0)
        })
        .count()
}

proptest! {
    /// Totals always equal the exact sum of their parts, whatever was sent.
    #[test]
    fn totals_are_conserved(commands in prop::collection::vec(arb_command(), 0..60)) {
        let mut session = QuoteSession::default();
        for command in commands {
            let _ = session.dispatch(command);
            let totals = session.totals();
            let sum = totals.categories.iter().map(|category| category.total_cents).sum::<i64>();
            prop_assert_eq!(totals.accessories_total_cents, sum);
            prop_assert_eq!(
                totals.grand_total_cents,
                totals.items_total_cents + totals.accessories_total_cents
            );
        }
    }

    /// Dual pricing follows floor(valid marked rows / 2) after every command.
    #[test]
    fn dual_follows_floor_rule(commands in prop::collection::vec(arb_command(), 0..60)) {
        let mut session = QuoteSession::default();
        for command in commands {
            let _ = session.dispatch(command);
            let pairs = (marked_valid_rows(&session) / 2) as i64;
            let unit = session.prices().unit_cents(PriceKey::ComboBracket);
            prop_assert_eq!(session.totals().category_cents(AccessoryKind::Dual), pairs * unit);
        }
    }

    /// A rejected command leaves rows, counts, split and totals as they were.
    #[test]
    fn rejected_commands_change_nothing(commands in prop::collection::vec(arb_command(), 0..60)) {
        let mut session = QuoteSession::default();
        for command in commands {
            let ledger = session.ledger().clone();
            let counts = *session.counts();
            let remotes = session.remotes().clone();
            let totals = session.totals().clone();
            if session.dispatch(command).is_err() {
                prop_assert_eq!(session.ledger(), &ledger);
                prop_assert_eq!(session.counts(), &counts);
                prop_assert_eq!(session.remotes(), &remotes);
                prop_assert_eq!(session.totals(), &totals);
            }
        }
    }

    /// Rows count toward accessories only with both dimensions set.
    #[test]
    fn validity_needs_both_dimensions(width in arb_dimension(), height in arb_dimension()) {
        let mut session = QuoteSession::default();
        session.dispatch(QuoteCommand::AddRow).expect("add row");
        let width_ok = session
            .dispatch(QuoteCommand::SetDimension { index: 0, axis: Axis::Width, value: width })
            .is_ok();
        let height_ok = session
            .dispatch(QuoteCommand::SetDimension { index: 0, axis: Axis::Height, value: height })
            .is_ok();
        prop_assert_eq!(session.ledger().rows()[0].is_valid(), width_ok && height_ok);
    }

    /// Entering and leaving the selector without toggles keeps the marks.
    #[test]
    fn selector_round_trip_is_idempotent(commands in prop::collection::vec(arb_command(), 0..40)) {
        let mut session = QuoteSession::default();
        for command in commands {
            let _ = session.dispatch(command);
        }
        let _ = session.dispatch(QuoteCommand::ExitDualSelection);
        let marks = session.ledger().marked_ids();
        let totals = session.totals().clone();

        session.dispatch(QuoteCommand::EnterDualSelection).expect("enter selection");
        session.dispatch(QuoteCommand::ExitDualSelection).expect("exit selection");
        prop_assert_eq!(session.ledger().marked_ids(), marks);
        prop_assert_eq!(session.totals(), &totals);
    }

    /// Clearing the ledger always leaves a zero quote.
    #[test]
    fn clear_resets_all_prices(commands in prop::collection::vec(arb_command(), 0..60)) {
        let mut session = QuoteSession::default();
        for command in commands {
            let _ = session.dispatch(command);
        }
        session.dispatch(QuoteCommand::ClearLedger).expect("clear ledger");
        let totals = session.totals();
        prop_assert!(session.ledger().marked_ids().is_empty());
        prop_assert_eq!(totals.accessories_total_cents, 0);
        prop_assert_eq!(totals.grand_total_cents, 0);
    }
}
