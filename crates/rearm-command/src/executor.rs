//! `CommandExecutor` — step sequencing and rollback.

use rearm_core::{AgentId, EquipPolicy, ItemId, MapPos};
use rearm_world::{World, WorldError};

use crate::{CommandError, CommandResult, EquipCommand, Executed};

/// Stateless executor.  All state lives in the world; the executor only
/// owns the sequencing discipline.
pub struct CommandExecutor;

impl CommandExecutor {
    /// Run `command` to completion or to a restored pre-command state.
    ///
    /// Always takes the authoritative reservation first and always releases
    /// it before returning — on success the item is held (the claim is
    /// moot), on failure the claim must not linger and starve other agents.
    pub fn execute<W: World>(
        command: &EquipCommand,
        world: &mut W,
        policy: &EquipPolicy,
    ) -> CommandResult<Executed> {
        let agent = command.agent();
        let item = command.item();

        if world.reserve(agent, item).is_err() {
            return Err(CommandError::ReservationDenied(item));
        }

        let result = match *command {
            EquipCommand::Equip { agent, item } => Self::run_equip(agent, item, world),
            EquipCommand::SwapPrimary { agent, item } => {
                Self::run_swap_primary(agent, item, world, policy)
            }
            EquipCommand::SwapSecondary { agent, item, displace } => {
                Self::run_swap_secondary(agent, item, displace, world)
            }
        };

        world.release(agent, item);
        result
    }

    // ── Equip (no current item) ───────────────────────────────────────────

    fn run_equip<W: World>(agent: AgentId, item: ItemId, world: &mut W) -> CommandResult<Executed> {
        world.equip_primary(agent, item)?;
        Ok(Executed { picked: item, displaced: None })
    }

    // ── SwapPrimary ───────────────────────────────────────────────────────

    fn run_swap_primary<W: World>(
        agent: AgentId,
        item: ItemId,
        world: &mut W,
        policy: &EquipPolicy,
    ) -> CommandResult<Executed> {
        let drop_pos = world
            .agent(agent)
            .ok_or(CommandError::Rejected(WorldError::AgentMissing(agent)))?
            .pos;

        if policy.weak_window_swap {
            Self::swap_drop_first(agent, item, drop_pos, world)
        } else {
            Self::swap_hold_until_equipped(agent, item, drop_pos, world)
        }
    }

    /// unequip-old → drop-old → equip-new.  Briefly unarmed, but the old
    /// weapon is already safe on the ground if the final step fails.
    fn swap_drop_first<W: World>(
        agent: AgentId,
        item: ItemId,
        drop_pos: MapPos,
        world: &mut W,
    ) -> CommandResult<Executed> {
        let old = world.unequip_primary(agent)?;

        if let Err(failed) = world.drop_at(agent, old, drop_pos) {
            // Old is still in hand; put it back on.
            return Err(Self::restore_primary(agent, old, world, failed));
        }

        if let Err(failed) = world.equip_primary(agent, item) {
            // Old is on the ground at our feet; re-equip it.
            return Err(Self::restore_primary(agent, old, world, failed));
        }

        Ok(Executed { picked: item, displaced: Some((old, drop_pos)) })
    }

    /// unequip-old (kept in hand) → equip-new → drop-old.  No unarmed
    /// window; the old weapon leaves the hand only after the new one is on.
    fn swap_hold_until_equipped<W: World>(
        agent: AgentId,
        item: ItemId,
        drop_pos: MapPos,
        world: &mut W,
    ) -> CommandResult<Executed> {
        let old = world.unequip_primary(agent)?;

        if let Err(failed) = world.equip_primary(agent, item) {
            return Err(Self::restore_primary(agent, old, world, failed));
        }

        if let Err(failed) = world.drop_at(agent, old, drop_pos) {
            // New is equipped; unwind completely so the failure is atomic.
            if let Err(unwind) = world.unequip_primary(agent) {
                return Err(CommandError::RestoreFailed { failed, restore: unwind });
            }
            let restore = Self::restore_primary(agent, old, world, failed);
            // Best-effort: return the new item to the ground so it isn't
            // stuck in hand.  A second failure here leaves it carried —
            // never destroyed — so it is not worth masking the original
            // error over.
            let _ = world.drop_at(agent, item, drop_pos);
            return Err(restore);
        }

        Ok(Executed { picked: item, displaced: Some((old, drop_pos)) })
    }

    /// Re-equip `old` after a failed step and grade the outcome.
    fn restore_primary<W: World>(
        agent: AgentId,
        old: ItemId,
        world: &mut W,
        failed: WorldError,
    ) -> CommandError {
        match world.equip_primary(agent, old) {
            Ok(())       => CommandError::RolledBack { failed },
            Err(restore) => CommandError::RestoreFailed { failed, restore },
        }
    }

    // ── SwapSecondary ─────────────────────────────────────────────────────

    fn run_swap_secondary<W: World>(
        agent: AgentId,
        item: ItemId,
        displace: Option<ItemId>,
        world: &mut W,
    ) -> CommandResult<Executed> {
        let drop_pos = world
            .agent(agent)
            .ok_or(CommandError::Rejected(WorldError::AgentMissing(agent)))?
            .pos;

        let Some(old) = displace else {
            // Plain stow; capacity errors surface to the scheduler, which
            // may retry with an explicit displacement.
            world.add_to_inventory(agent, item)?;
            return Ok(Executed { picked: item, displaced: None });
        };

        world.remove_from_inventory(agent, old)?;

        if let Err(failed) = world.drop_at(agent, old, drop_pos) {
            // Old is in hand; put it back in the bag.
            return Err(match world.add_to_inventory(agent, old) {
                Ok(())       => CommandError::RolledBack { failed },
                Err(restore) => CommandError::RestoreFailed { failed, restore },
            });
        }

        if let Err(failed) = world.add_to_inventory(agent, item) {
            // Old is on the ground; restore it to the inventory.
            return Err(match world.add_to_inventory(agent, old) {
                Ok(())       => CommandError::RolledBack { failed },
                Err(restore) => CommandError::RestoreFailed { failed, restore },
            });
        }

        Ok(Executed { picked: item, displaced: Some((old, drop_pos)) })
    }
}
