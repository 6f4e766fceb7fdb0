//! Superposition rebuild from collapsed neighbours
//!
//! Constraints only flow from decided cells: an uncollapsed neighbour carries no
//! information. A candidate survives only while every collapsed neighbour's
//! directional rule gives it nonzero support.

use crate::algorithm::cell::{Support, WaveCell};
use crate::algorithm::palette::Palette;
use crate::analysis::ruleset::Ruleset;
use crate::spatial::Direction;

/// Rebuild a cell's superpositions from scratch
///
/// `collapsed_neighbours` yields, for each collapsed neighbour, the direction
/// from the cell to that neighbour and the neighbour's tile index. Each rule is
/// read from the neighbour's point of view, i.e. with the inverse direction.
///
/// Per neighbour, in the order given, a candidate whose type is in the palette
/// is either reinforced (not pruned and the rule count is positive) or pruned,
/// in which case its earlier contribution is removed from the total. Pruning
/// is sticky for the rest of the rebuild. Collapsed cells are left untouched.
pub fn recalculate_cell<I>(
    cell: &mut WaveCell,
    collapsed_neighbours: I,
    ruleset: &Ruleset,
    palette: &Palette,
) where
    I: IntoIterator<Item = (Direction, usize)>,
{
    if !cell.can_collapse() {
        return;
    }

    cell.clear_superpositions();
    let mut total_weight = 0_u64;

    for (direction, neighbour_index) in collapsed_neighbours {
        let Some(rules) = ruleset.candidates(neighbour_index, direction.inverse()) else {
            continue;
        };

        for (slot, rule) in cell.superpositions_mut().iter_mut().zip(rules.iter()) {
            if !palette.contains(rule.block_type) {
                continue;
            }

            slot.block_type = rule.block_type;
            match slot.support {
                Support::Pruned => {}
                current if rule.count > 0 => {
                    let count = u64::from(rule.count);
                    slot.support = Support::Weighted(current.weight() + count);
                    total_weight += count;
                }
                current => {
                    total_weight -= current.weight();
                    slot.support = Support::Pruned;
                }
            }
        }
    }

    cell.set_total_weight(total_weight);
    cell.recount_types();
}
