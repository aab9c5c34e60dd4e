mod cases;

test_case!(
    arithmetic_and_boolean_operators,
    ic: "
        1 calc 0
        calc 1 s s
          s 0 2
            d walk.speed q i ball.seen 0 * i ball.distance 0 v 0.5 - v 0 v 1
            b head.tracking | 2 ! i ball.seen 0 > i ball.angle 0 v 30
          t s
        0",
    cycles: [
        { "ball.seen": true, "ball.distance": 300.0, "ball.angle": 0.0 }
            => { "walk.speed": 150.0, "head.tracking": false },
        { "ball.seen": false } => { "walk.speed": -1.0, "head.tracking": true },
        { "ball.seen": true, "ball.angle": 45.0 } => { "walk.speed": 150.0, "head.tracking": true },
    ],
);

test_case!(
    conjunction_needs_every_operand,
    ic: "
        1 calc 0
        calc 1 s s
          s 0 1 b head.tracking & 3 i ball.seen 0 g i ball.distance 0 v 100 l i ball.angle 0 v 10
          t s
        0",
    cycles: [
        { "ball.seen": true, "ball.distance": 100.0, "ball.angle": 10.0 } => { "head.tracking": true },
        { "ball.angle": 11.0 } => { "head.tracking": false },
        { "ball.angle": 0.0, "ball.seen": false } => { "head.tracking": false },
    ],
);

test_case!(
    division_by_zero_and_modulo,
    ic: "
        1 calc 0
        calc 1 s s
          s 0 2
            b head.tracking > d v 1 i ball.angle 0 v 1000000
            d walk.speed % v 7.8 i ball.distance 0
          t s
        0",
    cycles: [
        { "ball.angle": 0.0, "ball.distance": 2.0 } => { "head.tracking": true, "walk.speed": 1.0 },
        { "ball.angle": 2.0, "ball.distance": 4.5 } => { "head.tracking": false, "walk.speed": 3.0 },
    ],
);

test_case!(
    parameterized_input_symbol,
    ic: "
        1 calc 0
        calc 1 s s
          s 0 1 d walk.speed i math.abs 1 d value - v 0 i ball.distance 0
          t s
        0",
    cycles: [
        { "ball.distance": 40.0 } => { "walk.speed": 40.0 },
        { "ball.distance": -3.0 } => { "walk.speed": 3.0 },
    ],
);

test_case!(
    enumerated_conditional_and_equality,
    ic: "
        1 calc 0
        calc 1 s s
          s 0 2
            e sound q i ball.seen 0 v beep v none
            b head.tracking n i ball.angle 0 v 0
          t s
        0",
    cycles: [
        { "ball.seen": true, "ball.angle": 0.0 } => { "sound": "beep", "head.tracking": false },
        { "ball.seen": false, "ball.angle": 5.0 } => { "sound": "none", "head.tracking": true },
    ],
);

test_case!(
    output_symbols_can_be_read_back,
    ic: "
        1 count 0
        count 1 s s
          s 0 1 d walk.speed + o walk.speed v 1
          t s
        0",
    cycles: [
        { } => { "walk.speed": 1.0 },
        { } => { "walk.speed": 2.0 },
        { } => { "walk.speed": 3.0 },
    ],
);
