use freerun_eval_core::{
    parse_stored_tables_json, Channel, CharacterInput, CheckKind, ClipId, Config, CoreEvent,
    Cursor, Ease, EaseFamily, EaseLink, Engine, EntityInput, GoalInt, GoalRangeInt, GoalSample,
    GoalTable, GoalValue, Inputs, Kinematics, LaneTarget, MotionState, RangeCheckKind,
    SequencePlan, SwipeFlags, TableError,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn running(entity: freerun_eval_core::EntityId, velocity: f32, sprinting: bool) -> EntityInput {
    EntityInput {
        entity,
        kinematics: Kinematics {
            move_vector: [0.0, 1.0],
            velocity_magnitude: velocity,
            is_sprinting: sprinting,
            ..Default::default()
        },
        input: None,
    }
}

fn xy_plan() -> SequencePlan {
    SequencePlan::new(
        vec![
            EaseLink {
                ease: Ease::with_channel(EaseFamily::Linear, Channel::PositionX),
                next: 1,
                duration: 1.0,
            },
            EaseLink {
                ease: Ease::with_channel(EaseFamily::Linear, Channel::PositionY),
                next: 0,
                duration: 1.0,
            },
        ],
        vec![[0.0, 0.0, 0.0], [2.0, 4.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap()
}

/// it should resolve animation states for registered entities each tick
#[test]
fn update_resolves_animation_states() {
    let mut eng = Engine::new(Config::default());
    let e = eng.spawn(None);
    eng.set_motion_state(e, MotionState::GroundMove);
    assert_eq!(eng.motion_state(e).unwrap().current, MotionState::GroundMove);

    let mut inputs = Inputs::default();
    inputs.entities.push(running(e, 3.0, false));
    let out = eng.update(0.016, inputs);

    assert_eq!(out.animations.len(), 1);
    assert_eq!(out.animations[0].entity, e);
    assert_eq!(out.animations[0].output.clip, ClipId::Run);
    approx(out.animations[0].output.speed, 0.5, 1e-6);
    assert!(out.transforms.is_empty());
}

/// it should advance blend cursors and emit LinkCompleted on boundary ticks
#[test]
fn update_steps_blend_and_emits_completion() {
    let mut eng = Engine::new(Config::default());
    let plan = eng.load_plan(xy_plan());
    let e = eng.spawn(Some(plan));

    let mut inputs = Inputs::default();
    inputs.entities.push(running(e, 0.0, false));

    let out = eng.update(0.5, inputs.clone());
    assert_eq!(out.transforms.len(), 1);
    approx(out.transforms[0].transform.pos[0], 1.0, 1e-6);
    assert!(out.events.is_empty());

    let out = eng.update(0.5, inputs);
    approx(out.transforms[0].transform.pos[0], 2.0, 1e-6);
    assert_eq!(
        out.events,
        vec![CoreEvent::LinkCompleted {
            entity: e,
            from: 0,
            to: 1
        }]
    );
    let emitted = out.transforms[0].transform;
    assert_eq!(eng.cursor(e), Some(Cursor::at(1)));
    // The engine's retained transform matches the emitted change.
    assert_eq!(eng.transform(e), Some(emitted));
}

/// it should isolate a faulted entity's blend and keep the batch running
#[test]
fn per_entity_fault_isolation() {
    let mut eng = Engine::new(Config::default());
    let plan = eng.load_plan(xy_plan());
    let good = eng.spawn(Some(plan));
    let bad = eng.spawn(Some(plan));
    eng.set_cursor(bad, Cursor::at(9)); // stale/corrupted cursor

    let mut inputs = Inputs::default();
    inputs.entities.push(running(bad, 0.0, false));
    inputs.entities.push(running(good, 0.0, false));
    let out = eng.update(0.5, inputs);

    // Both entities still resolved an animation state.
    assert_eq!(out.animations.len(), 2);
    // Only the healthy entity produced a transform.
    assert_eq!(out.transforms.len(), 1);
    assert_eq!(out.transforms[0].entity, good);
    // The fault surfaced as a per-entity event.
    assert!(out
        .events
        .iter()
        .any(|ev| matches!(ev, CoreEvent::Error { entity, .. } if *entity == bad)));
}

/// it should score goal samples against the loaded tables
#[test]
fn update_scores_goal_samples() {
    let mut eng = Engine::new(Config::default());
    let mut table = GoalTable::new();
    table.insert_int(GoalInt {
        key: 7,
        check: CheckKind::GreaterOrEqual,
        target: 10,
    });
    eng.load_goal_table(table).unwrap();

    let mut inputs = Inputs::default();
    inputs.goal_samples.push(GoalSample {
        key: 7,
        value: GoalValue::Int(5),
    });
    inputs.goal_samples.push(GoalSample {
        key: 99, // unknown keys are ignored
        value: GoalValue::Int(1),
    });
    let out = eng.update(0.016, inputs);
    assert_eq!(out.goals.len(), 1);
    assert!(!out.goals[0].progress.met);
    approx(out.goals[0].progress.fraction, 0.5, 1e-6);
    assert!(out.events.is_empty());

    let mut inputs = Inputs::default();
    inputs.goal_samples.push(GoalSample {
        key: 7,
        value: GoalValue::Int(12),
    });
    let out = eng.update(0.016, inputs);
    assert!(out.goals[0].progress.met);
    assert_eq!(out.events, vec![CoreEvent::GoalMet { key: 7 }]);
}

/// it should reject malformed goal tables at load time
#[test]
fn load_rejects_malformed_goal_table() {
    let mut eng = Engine::new(Config::default());
    let mut table = GoalTable::new();
    table.insert_int_range(GoalRangeInt {
        key: 1,
        check: RangeCheckKind::Between,
        lower: 10,
        upper: 10,
    });
    assert!(eng.load_goal_table(table).is_err());
}

/// it should consume swipes at end of tick while lane state persists
#[test]
fn lane_state_persists_across_ticks() {
    let mut eng = Engine::new(Config::default());
    let e = eng.spawn(None);

    let mut record = running(e, 0.0, false);
    record.input = Some(CharacterInput {
        swipes: SwipeFlags::LEFT,
        lane: LaneTarget::Left,
        lane_reached: false,
    });
    let mut inputs = Inputs::default();
    inputs.entities.push(record);
    eng.update(0.016, inputs);

    let latched = eng.character_input(e).unwrap();
    assert!(latched.swipes.is_empty());
    assert_eq!(latched.lane, LaneTarget::Left);

    // A tick with no input record leaves the latched lane untouched.
    let mut inputs = Inputs::default();
    inputs.entities.push(running(e, 0.0, false));
    eng.update(0.016, inputs);
    assert_eq!(eng.character_input(e).unwrap().lane, LaneTarget::Left);
}

/// it should parse, validate, and install a baked-tables document
#[test]
fn stored_tables_roundtrip_through_engine() {
    let doc = r#"{
        "maxSpeeds": {
            "groundSprint": 10.0, "groundRun": 5.0, "crouched": 2.0,
            "climbing": 3.0, "ledgeMove": 1.5, "swimming": 4.0
        },
        "goals": {
            "ints": [ { "key": 1, "check": "GreaterOrEqual", "target": 10 } ],
            "floatRanges": [
                { "key": 2, "check": "Between", "lower": 0.0, "upper": 10.0 }
            ]
        },
        "plans": [ {
            "links": [
                { "ease": 0,  "next": 1, "duration": 1.0 },
                { "ease": 32, "next": 0, "duration": 1.0 }
            ],
            "positions": [ [0.0, 0.0, 0.0], [2.0, 4.0, 0.0] ]
        } ]
    }"#;
    let tables = parse_stored_tables_json(doc).unwrap();

    let mut eng = Engine::new(Config::default());
    let plans = eng.load_tables(tables).unwrap();
    assert_eq!(plans.len(), 1);

    let e = eng.spawn(Some(plans[0]));
    eng.set_motion_state(e, MotionState::GroundMove);
    let mut inputs = Inputs::default();
    inputs.entities.push(running(e, 2.5, false));
    inputs.goal_samples.push(GoalSample {
        key: 2,
        value: GoalValue::Float(5.0),
    });
    let out = eng.update(0.5, inputs);

    // Max speeds came from the document (2.5 / 5.0).
    approx(out.animations[0].output.speed, 0.5, 1e-6);
    // Link 0 carries ease byte 0 = linear PositionX.
    approx(out.transforms[0].transform.pos[0], 1.0, 1e-6);
    // Float range goal from the document.
    assert!(out.goals[0].progress.met);
}

/// it should reject broken plan graphs and duplicate goal keys in documents
#[test]
fn stored_tables_rejects_bad_documents() {
    let bad_plan = r#"{ "plans": [ {
        "links": [ { "ease": 0, "next": 3, "duration": 1.0 } ],
        "positions": [ [0.0, 0.0, 0.0] ]
    } ] }"#;
    assert!(matches!(
        parse_stored_tables_json(bad_plan),
        Err(TableError::Plan { index: 0, .. })
    ));

    let dup_keys = r#"{ "goals": {
        "ints": [ { "key": 1, "check": "Equals", "target": 1 } ],
        "intRanges": [ { "key": 1, "check": "Between", "lower": 0, "upper": 5 } ]
    } }"#;
    assert!(matches!(
        parse_stored_tables_json(dup_keys),
        Err(TableError::Goal(_))
    ));

    let malformed_range = r#"{ "goals": {
        "intRanges": [ { "key": 1, "check": "Between", "lower": 5, "upper": 5 } ]
    } }"#;
    assert!(matches!(
        parse_stored_tables_json(malformed_range),
        Err(TableError::Goal(_))
    ));

    assert!(matches!(
        parse_stored_tables_json("not json"),
        Err(TableError::Parse(_))
    ));
}

/// it should produce identical outputs for the same dt sequence (determinism)
#[test]
fn determinism_same_sequence_same_outputs() {
    let build = || {
        let mut eng = Engine::new(Config::default());
        let plan = eng.load_plan(xy_plan());
        let e = eng.spawn(Some(plan));
        eng.set_motion_state(e, MotionState::GroundMove);
        (eng, e)
    };
    let (mut e1, id1) = build();
    let (mut e2, id2) = build();

    let seq = [0.016f32, 0.016, 0.032, 0.0, 0.1, 0.5];
    for dt in seq {
        let mut i1 = Inputs::default();
        i1.entities.push(running(id1, 4.0, true));
        let mut i2 = Inputs::default();
        i2.entities.push(running(id2, 4.0, true));
        let o1 = serde_json::to_string(e1.update(dt, i1)).unwrap();
        let o2 = serde_json::to_string(e2.update(dt, i2)).unwrap();
        assert_eq!(o1, o2);
    }
}

/// it should produce empty outputs when the engine has no data
#[test]
fn update_with_no_data_is_safe_and_empty() {
    let mut eng = Engine::new(Config::default());
    let out = eng.update(0.016, Inputs::default());
    assert!(out.is_empty());
}

/// it should drop events past the per-tick cap but never drop changes
#[test]
fn event_cap_drops_events_not_changes() {
    let cfg = Config {
        max_events_per_tick: 1,
        ..Default::default()
    };
    let mut eng = Engine::new(cfg);
    let plan = eng.load_plan(xy_plan());
    let a = eng.spawn(Some(plan));
    let b = eng.spawn(Some(plan));

    let mut inputs = Inputs::default();
    inputs.entities.push(running(a, 0.0, false));
    inputs.entities.push(running(b, 0.0, false));
    // Both entities complete their link on the same tick.
    let out = eng.update(1.0, inputs);
    assert_eq!(out.transforms.len(), 2);
    assert_eq!(out.events.len(), 1);
}

/// it should round-trip Config through serde
#[test]
fn config_serde_roundtrip() {
    let cfg = Config::default();
    let s = serde_json::to_string(&cfg).unwrap();
    let cfg2: Config = serde_json::from_str(&s).unwrap();
    assert_eq!(cfg2.entity_capacity, cfg.entity_capacity);
    assert_eq!(cfg2.max_events_per_tick, cfg.max_events_per_tick);
}
