use crate::gesture::{ActionOrigin, GestureEffect, GestureOutput, GestureStateId, PointerKind};

/// Per-controller gesture tallies. Saturating, never reset implicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureCounters {
    pub sessions: u32,
    pub clicks: u32,
    pub drags: u32,
    pub long_presses: u32,
    pub centered_long_presses: u32,
    pub directional_actions: u32,
    pub cancels: u32,
    pub resets: u32,
    pub ignored_events: u32,
}

impl GestureCounters {
    pub(crate) fn record_pointer(
        &mut self,
        before: GestureStateId,
        kind: PointerKind,
        output: &GestureOutput,
    ) {
        let after = output.trace.state_id;
        match (before, kind) {
            (GestureStateId::Idle, PointerKind::Down) => bump(&mut self.sessions),
            (GestureStateId::Idle, _) | (_, PointerKind::Down) => bump(&mut self.ignored_events),
            (GestureStateId::Pressed, PointerKind::Move) if after == GestureStateId::Dragging => {
                bump(&mut self.drags)
            }
            (_, PointerKind::Cancel) => bump(&mut self.cancels),
            _ => {}
        }
        self.record_actions(output);
    }

    pub(crate) fn record_timer(&mut self, output: &GestureOutput) {
        self.record_actions(output);
    }

    pub(crate) fn record_reset(&mut self) {
        bump(&mut self.resets);
    }

    fn record_actions(&mut self, output: &GestureOutput) {
        for effect in &output.effects {
            match effect {
                GestureEffect::Vibrate => bump(&mut self.long_presses),
                GestureEffect::Emit { origin, .. } => match origin {
                    ActionOrigin::Click => bump(&mut self.clicks),
                    ActionOrigin::CenteredLongPress => bump(&mut self.centered_long_presses),
                    ActionOrigin::Directional(_) => bump(&mut self.directional_actions),
                },
                _ => {}
            }
        }
    }
}

fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}
