//! Engine: table ownership and the per-tick update pass.
//!
//! The engine owns the baked tables (max speeds, goal descriptors, sequence
//! plans) and the only mutable per-entity state in the core: the motion-state
//! pair, the blend cursor, the transform record, and the latched character
//! input. `update` maps the stateless evaluators over the tick's input
//! records and fills the reusable `Outputs` buffer.
//!
//! Entities are independent: a fault in one entity's blend step is logged,
//! reported as an event, and does not stop the batch.

use freerun_api_core::{CharacterInput, MotionState, TransformRecord};

use crate::config::Config;
use crate::goals::{GoalTable, GoalTableError};
use crate::ids::{EntityId, IdAllocator, PlanId};
use crate::inputs::{GoalValue, Inputs};
use crate::outputs::{AnimationChange, CoreEvent, GoalChange, Outputs, TransformChange};
use crate::resolver::{CharacterState, MaxSpeeds};
use crate::sequence::{Cursor, SequencePlan};
use crate::stored_tables::StoredTables;

/// Per-entity mutable state.
#[derive(Debug)]
struct EntitySlot {
    id: EntityId,
    state: CharacterState,
    plan: Option<PlanId>,
    cursor: Cursor,
    transform: TransformRecord,
    input: CharacterInput,
}

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,

    // Baked tables: immutable once installed, rebuilt wholesale on change.
    speeds: MaxSpeeds,
    goals: GoalTable,
    plans: Vec<SequencePlan>,

    entities: Vec<EntitySlot>,

    // Per-tick outputs, reused across updates.
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            entities: Vec::with_capacity(cfg.entity_capacity),
            cfg,
            ids: IdAllocator::new(),
            speeds: MaxSpeeds::default(),
            goals: GoalTable::default(),
            plans: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    /// Replace the max-speed table.
    pub fn set_max_speeds(&mut self, speeds: MaxSpeeds) {
        self.speeds = speeds;
    }

    /// Validate and install a goal table. Malformed descriptors are rejected
    /// here so evaluation never sees them.
    pub fn load_goal_table(&mut self, table: GoalTable) -> Result<(), GoalTableError> {
        table.validate()?;
        self.goals = table;
        Ok(())
    }

    /// Install a sequence plan (already validated by construction) and
    /// return its id.
    pub fn load_plan(&mut self, plan: SequencePlan) -> PlanId {
        let id = PlanId(self.plans.len() as u32);
        self.plans.push(plan);
        id
    }

    /// Install a full set of parsed baked tables. Returns the ids assigned
    /// to the plans, in input order.
    pub fn load_tables(&mut self, tables: StoredTables) -> Result<Vec<PlanId>, GoalTableError> {
        self.set_max_speeds(tables.speeds);
        self.load_goal_table(tables.goals)?;
        Ok(tables.plans.into_iter().map(|p| self.load_plan(p)).collect())
    }

    /// Register an entity, optionally attached to a sequence plan (cursor
    /// starts at link 0).
    pub fn spawn(&mut self, plan: Option<PlanId>) -> EntityId {
        let id = self.ids.alloc_entity();
        self.entities.push(EntitySlot {
            id,
            state: CharacterState::default(),
            plan,
            cursor: Cursor::default(),
            transform: TransformRecord::default(),
            input: CharacterInput::default(),
        });
        id
    }

    /// Record a motion-state transition for an entity. Unknown ids are
    /// ignored.
    pub fn set_motion_state(&mut self, entity: EntityId, next: MotionState) {
        if let Some(slot) = self.entities.iter_mut().find(|s| s.id == entity) {
            slot.state.transition_to(next);
        }
    }

    pub fn motion_state(&self, entity: EntityId) -> Option<CharacterState> {
        self.slot(entity).map(|s| s.state)
    }

    /// Reposition an entity's blend cursor (seek / sentinel-stop handling is
    /// the caller's business).
    pub fn set_cursor(&mut self, entity: EntityId, cursor: Cursor) {
        if let Some(slot) = self.entities.iter_mut().find(|s| s.id == entity) {
            slot.cursor = cursor;
        }
    }

    pub fn cursor(&self, entity: EntityId) -> Option<Cursor> {
        self.slot(entity).map(|s| s.cursor)
    }

    pub fn transform(&self, entity: EntityId) -> Option<TransformRecord> {
        self.slot(entity).map(|s| s.transform)
    }

    /// The entity's latched input: swipes from this tick's record are
    /// consumed at the end of the tick, lane state persists.
    pub fn character_input(&self, entity: EntityId) -> Option<CharacterInput> {
        self.slot(entity).map(|s| s.input)
    }

    fn slot(&self, entity: EntityId) -> Option<&EntitySlot> {
        self.entities.iter().find(|s| s.id == entity)
    }

    /// Step the simulation by dt with given inputs, producing outputs:
    /// resolve animation states, advance blend cursors, score goal samples.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        let cap = self.cfg.max_events_per_tick;

        for record in inputs.entities {
            let Some(slot) = self.entities.iter_mut().find(|s| s.id == record.entity) else {
                // Records for unregistered entities are dropped; the driver
                // and the engine can disagree briefly around despawn.
                continue;
            };
            if let Some(input) = record.input {
                slot.input = input;
            }

            let output = slot.state.animation_output(&record.kinematics, &self.speeds);
            self.outputs.animations.push(AnimationChange {
                entity: slot.id,
                output,
            });

            if let Some(plan_id) = slot.plan {
                let from = slot.cursor.current;
                match self.plans.get(plan_id.0 as usize) {
                    Some(plan) => {
                        match plan.step_transform(&mut slot.cursor, dt, &mut slot.transform) {
                            Ok(outcome) => {
                                self.outputs.transforms.push(TransformChange {
                                    entity: slot.id,
                                    transform: slot.transform,
                                });
                                if let Some(to) = outcome.advanced_to {
                                    push_event(
                                        &mut self.outputs,
                                        cap,
                                        CoreEvent::LinkCompleted {
                                            entity: slot.id,
                                            from,
                                            to,
                                        },
                                    );
                                }
                            }
                            Err(err) => {
                                // Fatal to this entity's blend only; the
                                // batch keeps going.
                                log::warn!("entity {}: blend step failed: {err}", slot.id.0);
                                push_event(
                                    &mut self.outputs,
                                    cap,
                                    CoreEvent::Error {
                                        entity: slot.id,
                                        message: err.to_string(),
                                    },
                                );
                            }
                        }
                    }
                    None => {
                        log::warn!("entity {}: unknown plan id {}", slot.id.0, plan_id.0);
                        push_event(
                            &mut self.outputs,
                            cap,
                            CoreEvent::Error {
                                entity: slot.id,
                                message: format!("unknown plan id {}", plan_id.0),
                            },
                        );
                    }
                }
            }

            // Swipes are one-frame events; lane state persists.
            slot.input.clear_swipes();
        }

        for sample in inputs.goal_samples {
            let progress = match sample.value {
                GoalValue::Int(v) => self.goals.progress_int(sample.key, v),
                GoalValue::Float(v) => self.goals.progress_float(sample.key, v),
            };
            // Samples for keys absent from the tables are ignored.
            if let Some(progress) = progress {
                self.outputs.goals.push(GoalChange {
                    key: sample.key,
                    progress,
                });
                if progress.met {
                    push_event(&mut self.outputs, cap, CoreEvent::GoalMet { key: sample.key });
                }
            }
        }

        &self.outputs
    }
}

/// Push an event unless the per-tick cap is reached (changes are never
/// capped).
fn push_event(outputs: &mut Outputs, cap: usize, event: CoreEvent) {
    if outputs.events.len() < cap {
        outputs.events.push(event);
    } else {
        log::debug!("event cap {cap} reached; dropping {event:?}");
    }
}
