use super::*;
use crate::gesture::types::{ActionOrigin, OverlayAction};

impl GestureHsm {
    /// Discrete action owed for releasing from `released_from`. The terminal
    /// states are disjoint, so at most one outcome applies.
    pub(super) fn release_outcome(
        &self,
        released_from: GestureStateId,
        release_ms: u64,
    ) -> Option<(OverlayAction, ActionOrigin)> {
        let session = self.session.as_ref()?;
        match released_from {
            GestureStateId::Pressed => {
                let elapsed = session.elapsed_ms(release_ms);
                let is_click =
                    !session.moved_beyond_slop && elapsed < self.config.click_timeout_ms;
                if !is_click {
                    log::debug!(
                        "gesture: release without click session={} elapsed_ms={} moved={}",
                        session.token.session(),
                        elapsed,
                        session.moved_beyond_slop
                    );
                }
                is_click.then_some((OverlayAction::OpenMenu, ActionOrigin::Click))
            }
            GestureStateId::LongPressed => self
                .config
                .centered_long_press
                .map(|action| (action, ActionOrigin::CenteredLongPress)),
            GestureStateId::LongDragging => session
                .armed_direction
                .map(|direction| (direction.action(), ActionOrigin::Directional(direction))),
            GestureStateId::Idle | GestureStateId::Dragging => None,
        }
    }

    /// Cancels the timer, emits `outcome` and snaps the ball home. Effects are
    /// ordered so the collaborators see the action before the animation.
    pub(super) fn end_session(
        &mut self,
        context: &mut DispatchContext,
        outcome: Option<(OverlayAction, ActionOrigin)>,
    ) {
        self.disarm_long_press(context);

        if let Some((action, origin)) = outcome {
            log::debug!(
                "gesture: action={} origin={:?} session={}",
                action.label(),
                origin,
                self.last_session
            );
            context.effects.push(GestureEffect::Emit { action, origin });
        }

        if let Some(session) = self.session.take() {
            context.effects.push(GestureEffect::SnapBack {
                position: session.rest_position(),
                duration_ms: self.config.snap_back_duration_ms,
            });
        }
    }
}
