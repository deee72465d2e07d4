//! Ticket selection reducer.
//!
//! Maintains the picker invariants: a selection is always a tier with
//! remaining inventory, and `1 <= quantity <= available_quantity`.

use eventbook_core::{effect::Effect, effect::Effects, smallvec};

use crate::actions::{AppAction, SelectionAction};
use crate::state::{AppState, SelectionState};
use crate::types::TicketTier;

pub(crate) fn reduce(state: &mut AppState, action: SelectionAction) -> Effects<AppAction> {
    let selection = &mut state.selection;
    match action {
        SelectionAction::TiersLoaded(tiers) => reconcile_tiers(selection, tiers),

        SelectionAction::TierSelected(tier_type) => {
            let selectable = selection
                .tiers
                .iter()
                .any(|t| t.tier_type == tier_type && !t.is_sold_out());
            if selectable {
                selection.selected = Some(tier_type);
                selection.quantity = 1;
            }
        }

        SelectionAction::Incremented => {
            if let Some(tier) = selection.selected_tier() {
                let ceiling = tier.available_quantity;
                if selection.quantity < ceiling {
                    selection.quantity += 1;
                }
            }
        }

        SelectionAction::Decremented => {
            if selection.selected.is_some() && selection.quantity > 1 {
                selection.quantity -= 1;
            }
        }

        SelectionAction::QuantitySet(quantity) => {
            if let Some(tier) = selection.selected_tier() {
                // Out-of-range entry is rejected outright so the user
                // sees their typed value bounce back to the last valid
                // one.
                if quantity >= 1 && quantity <= tier.available_quantity {
                    selection.quantity = quantity;
                }
            }
        }

        SelectionAction::Reset => selection.clear(),
    }
    smallvec![Effect::None]
}

/// Install freshly fetched tiers and reconcile the current selection
/// against them: a now-sold-out selection is dropped, and a quantity
/// above the new availability is pulled down to it.
pub(crate) fn reconcile_tiers(selection: &mut SelectionState, tiers: Vec<TicketTier>) {
    selection.tiers = tiers;
    if let Some(selected) = selection.selected {
        let available = selection
            .tiers
            .iter()
            .find(|t| t.tier_type == selected)
            .map_or(0, |t| t.available_quantity);
        if available == 0 {
            selection.clear();
        } else if selection.quantity > available {
            selection.quantity = available;
        }
    }
}
