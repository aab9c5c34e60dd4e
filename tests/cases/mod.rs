//! A small soccer robot environment for driving option graphs cycle by
//! cycle, and the `test_case!` macro built on top of it.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use xabsl::{Clock, Engine, EngineOptions, Error, InputBinding};

/// Milliseconds the clock advances between two cycles.
pub const CYCLE_MS: u64 = 100;

/// A value fed into an input symbol before a cycle.
#[derive(Debug, Clone, Copy)]
pub enum Input {
    Decimal(f64),
    Boolean(bool),
    Element(&'static str),
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Decimal(value)
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Boolean(value)
    }
}

impl From<&'static str> for Input {
    fn from(element: &'static str) -> Self {
        Input::Element(element)
    }
}

/// A value read back after a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    Decimal(f64),
    Boolean(bool),
    Name(String),
}

impl From<f64> for Observed {
    fn from(value: f64) -> Self {
        Observed::Decimal(value)
    }
}

impl From<bool> for Observed {
    fn from(value: bool) -> Self {
        Observed::Boolean(value)
    }
}

impl From<&str> for Observed {
    fn from(name: &str) -> Self {
        Observed::Name(name.to_string())
    }
}

pub struct Harness {
    pub engine: Engine,
    time: Rc<Cell<u64>>,
    ball_distance: Rc<Cell<f64>>,
    ball_angle: Rc<Cell<f64>>,
    ball_seen: Rc<Cell<bool>>,
    game_role: Rc<Cell<i32>>,
    walk_speed: Rc<Cell<f64>>,
    head_tracking: Rc<Cell<bool>>,
    sound: Rc<Cell<i32>>,
    kicks: Rc<Cell<u32>>,
    kick_strength: Rc<Cell<f64>>,
}

impl Harness {
    /// Registers:
    /// - decimal inputs `ball.distance`, `ball.angle` and `math.abs(value)`
    /// - boolean input `ball.seen`
    /// - enumerated input `game.role` of `role` (striker, keeper, defender)
    /// - outputs `walk.speed`, `head.tracking` and `sound` of `sound`
    ///   (none, beep, whistle)
    /// - basic behavior `kick(strength)`
    pub fn new() -> Self {
        let time = Rc::new(Cell::new(0));
        let ball_distance = Rc::new(Cell::new(0.0));
        let ball_angle = Rc::new(Cell::new(0.0));
        let ball_seen = Rc::new(Cell::new(false));
        let game_role = Rc::new(Cell::new(0));
        let walk_speed = Rc::new(Cell::new(0.0));
        let head_tracking = Rc::new(Cell::new(false));
        let sound = Rc::new(Cell::new(0));
        let kicks = Rc::new(Cell::new(0));
        let kick_strength = Rc::new(Cell::new(0.0_f64));
        let abs_value = Rc::new(Cell::new(0.0_f64));

        let clock = Clock::new({
            let time = time.clone();
            move || time.get()
        });
        let engine = Engine::new(EngineOptions::default(), clock, |env| {
            for (element, value) in [("striker", 0), ("keeper", 1), ("defender", 2)] {
                env.symbols().register_enum_element("role", element, value)?;
            }
            for (element, value) in [("none", 0), ("beep", 1), ("whistle", 2)] {
                env.symbols().register_enum_element("sound", element, value)?;
            }

            let symbols = env.symbols();
            symbols.register_decimal_input_symbol("ball.distance", ball_distance.clone())?;
            symbols.register_decimal_input_symbol("ball.angle", ball_angle.clone())?;
            symbols.register_decimal_input_symbol(
                "math.abs",
                InputBinding::function({
                    let value = abs_value.clone();
                    move || value.get().abs()
                }),
            )?;
            symbols.register_decimal_input_symbol_decimal_parameter(
                "math.abs",
                "value",
                abs_value.clone(),
            )?;
            symbols.register_boolean_input_symbol("ball.seen", ball_seen.clone())?;
            symbols.register_enumerated_input_symbol("game.role", "role", game_role.clone())?;
            symbols.register_decimal_output_symbol("walk.speed", walk_speed.clone())?;
            symbols.register_boolean_output_symbol("head.tracking", head_tracking.clone())?;
            symbols.register_enumerated_output_symbol("sound", "sound", sound.clone())?;

            env.register_basic_behavior("kick", {
                let kicks = kicks.clone();
                move || kicks.set(kicks.get() + 1)
            })?;
            env.register_basic_behavior_decimal_parameter("kick", "strength", kick_strength.clone())
        })
        .expect("environment registration failed");

        Self {
            engine,
            time,
            ball_distance,
            ball_angle,
            ball_seen,
            game_role,
            walk_speed,
            head_tracking,
            sound,
            kicks,
            kick_strength,
        }
    }

    pub fn construct(&mut self, ic: &str) -> Result<(), Error> {
        self.engine.create_option_graph(ic)
    }

    pub fn set_input(&self, name: &str, value: impl Into<Input>) {
        match (name, value.into()) {
            ("ball.distance", Input::Decimal(value)) => self.ball_distance.set(value),
            ("ball.angle", Input::Decimal(value)) => self.ball_angle.set(value),
            ("ball.seen", Input::Boolean(value)) => self.ball_seen.set(value),
            ("game.role", Input::Element(element)) => {
                let role = self.engine.symbols().enumerations().get("role");
                let value = role.and_then(|role| role.value_of(element));
                self.game_role.set(value.expect("unknown role"));
            }
            (name, value) => panic!("cannot set input `{}` to {:?}", name, value),
        }
    }

    /// Runs one cycle; every cycle after the first starts `CYCLE_MS` later.
    pub fn cycle(&mut self) {
        if self.engine.cycle() > 0 {
            self.time.set(self.time.get() + CYCLE_MS);
        }
        self.engine.execute().expect("execution failed");
    }

    /// Reads an output symbol, the kick counters, or `state:<option>` for
    /// the active state of an option.
    pub fn output(&self, name: &str) -> Observed {
        if let Some(option) = name.strip_prefix("state:") {
            let graph = self.engine.graph().expect("no option graph");
            let option = graph.options().get(option).expect("unknown option");
            return Observed::Name(option.active_state().name().to_string());
        }
        match name {
            "walk.speed" => Observed::Decimal(self.walk_speed.get()),
            "head.tracking" => Observed::Boolean(self.head_tracking.get()),
            "sound" => Observed::Name(
                self.engine
                    .symbols()
                    .enumerated_output_element("sound")
                    .unwrap_or("?")
                    .to_string(),
            ),
            "kick.count" => Observed::Decimal(f64::from(self.kicks.get())),
            "kick.strength" => Observed::Decimal(self.kick_strength.get()),
            _ => panic!("unknown output `{}`", name),
        }
    }
}

#[macro_export]
macro_rules! test_case {
    (
        $name:ident,
        ic: $ic:expr,
        error: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let mut harness = $crate::cases::Harness::new();
            let err = harness.construct($ic).unwrap_err();
            let rendered = xabsl::render_error_to_string_no_color(&err);
            assert!(
                rendered.contains($expected),
                "expected `{}` in:\n{}",
                $expected,
                rendered
            );
            assert!(harness.engine.graph().is_none());
        }
    };
    (
        $name:ident,
        ic: $ic:expr,
        $(agent: $agent:expr,)?
        cycles: [
            $(
                { $($input:literal : $ivalue:expr),* $(,)? }
                => { $($output:literal : $ovalue:expr),* $(,)? }
            ),* $(,)?
        ] $(,)?
    ) => {
        #[test]
        fn $name() {
            let mut harness = $crate::cases::Harness::new();
            harness.construct($ic).unwrap();
            $( harness.engine.set_selected_agent($agent).unwrap(); )?
            $(
                $( harness.set_input($input, $ivalue); )*
                harness.cycle();
                $(
                    pretty_assertions::assert_eq!(
                        harness.output($output),
                        $crate::cases::Observed::from($ovalue),
                        "`{}` after cycle {}",
                        $output,
                        harness.engine.cycle()
                    );
                )*
            )*
        }
    };
}
