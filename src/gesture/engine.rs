use statig::blocking::IntoStateMachineExt as _;

use super::{
    config::{active_config, ConfigError, GestureConfig},
    hsm::{DispatchContext, GestureHsm, GestureHsmEvent},
    timer::TimerToken,
    trace::GestureTraceSample,
    types::{EffectBuffer, GestureStateId, Point, PointerEvent},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutput {
    pub effects: EffectBuffer,
    pub trace: GestureTraceSample,
}

/// Turns one pointer stream into overlay drags, ball placement and discrete
/// actions. Not reentrant: feed it from a single ordered queue.
pub struct GestureInterpreter {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::from_valid(*active_config())
    }
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    pub fn with_rest_position(mut self, rest_position: Point) -> Self {
        self.set_rest_position(rest_position);
        self
    }

    /// Moves the ball's rest point. Refused while a session is live so the
    /// snap-back target never changes mid-gesture.
    pub fn set_rest_position(&mut self, rest_position: Point) -> bool {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(
            &GestureHsmEvent::SetRestPosition(rest_position),
            &mut context,
        );
        context.rest_position_applied
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureOutput {
        self.dispatch(GestureHsmEvent::Pointer(event), event.t_ms)
    }

    /// Delivers a long-press deadline previously requested through
    /// `GestureEffect::ScheduleLongPress`.
    pub fn long_press_elapsed(&mut self, token: TimerToken, now_ms: u64) -> GestureOutput {
        self.dispatch(GestureHsmEvent::LongPressElapsed { token, now_ms }, now_ms)
    }

    pub fn state(&self) -> GestureStateId {
        self.machine.inner().state_id()
    }

    pub fn is_idle(&self) -> bool {
        self.state() == GestureStateId::Idle
    }

    pub fn config(&self) -> &GestureConfig {
        self.machine.inner().config()
    }

    pub fn rest_position(&self) -> Point {
        self.machine.inner().rest_position()
    }

    pub fn pending_long_press(&self) -> Option<TimerToken> {
        self.machine.inner().pending_long_press()
    }

    fn dispatch(&mut self, event: GestureHsmEvent, now_ms: u64) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        GestureOutput {
            effects: context.effects,
            trace: self.machine.inner().trace(now_ms),
        }
    }
}
