mod cases;

test_case!(
    approach_slows_down_near_ball,
    ic: "
        1 approach 0
        approach 2 far near far
          far 0 1 d walk.speed v 300 i < i ball.distance 0 v 500 t near t far
          near 1 1 d walk.speed v 100 i > i ball.distance 0 v 700 t far t near
        1 striker approach",
    cycles: [
        { "ball.distance": 800.0 } => { "walk.speed": 300.0, "state:approach": "far" },
        { "ball.distance": 400.0 } => { "walk.speed": 300.0, "state:approach": "near" },
        { } => { "walk.speed": 100.0, "state:approach": "near" },
        { "ball.distance": 900.0 } => { "walk.speed": 100.0, "state:approach": "far" },
        { } => { "walk.speed": 300.0 },
    ],
);

test_case!(
    state_time_drives_timeouts,
    ic: "
        1 search 0
        search 2 look turn look
          look 0 1 b head.tracking v true i > s v 250 t turn t look
          turn 0 1 b head.tracking v false i > s v 150 t look t turn
        0",
    cycles: [
        { } => { "state:search": "look", "head.tracking": true },
        { } => { "state:search": "look" },
        { } => { "state:search": "look" },
        { } => { "state:search": "turn", "head.tracking": true },
        { } => { "state:search": "turn", "head.tracking": false },
        { } => { "state:search": "look", "head.tracking": false },
        { } => { "state:search": "look", "head.tracking": true },
    ],
);

test_case!(
    option_time_counts_from_activation,
    ic: "
        1 warmup 0
        warmup 2 idle go idle
          idle 0 1 d walk.speed t i > t v 150 t go t idle
          go 1 1 d walk.speed v 999 t go
        0",
    cycles: [
        { } => { "walk.speed": 0.0, "state:warmup": "idle" },
        { } => { "walk.speed": 100.0, "state:warmup": "idle" },
        { } => { "walk.speed": 200.0, "state:warmup": "go" },
        { } => { "walk.speed": 999.0 },
    ],
);

test_case!(
    else_if_chain_picks_first_match,
    ic: "
        1 play 0
        play 3 attack defend wait wait
          attack 0 1 e sound v beep
            i c i game.role 0 v striker t attack i c i game.role 0 v keeper t defend t wait
          defend 0 1 e sound v whistle
            i c i game.role 0 v striker t attack i c i game.role 0 v keeper t defend t wait
          wait 0 1 e sound v none
            i c i game.role 0 v striker t attack i c i game.role 0 v keeper t defend t wait
        0",
    cycles: [
        { "game.role": "striker" } => { "sound": "none", "state:play": "attack" },
        { "game.role": "keeper" } => { "sound": "beep", "state:play": "defend" },
        { "game.role": "defender" } => { "sound": "whistle", "state:play": "wait" },
        { } => { "sound": "none", "state:play": "wait" },
    ],
);

test_case!(
    transition_to_same_state_keeps_state_time,
    ic: "
        1 wait 0
        wait 1 idle idle
          idle 0 1 d walk.speed s t idle
        0",
    cycles: [
        { } => { "walk.speed": 0.0 },
        { } => { "walk.speed": 100.0 },
        { } => { "walk.speed": 200.0 },
    ],
);
