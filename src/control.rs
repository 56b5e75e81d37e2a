//! The control loop's state and one iteration of it.
//!
//! [Hitbox] owns everything that changes at run time: the switch table, the dispatcher with its
//! keyboard and activity LED, and the session timer with its LED. The firmware calls
//! [Hitbox::tick] forever with a short sleep in between.

use crate::config::MAX_SWITCHES;
use crate::debounce::{Edge, SwitchState};
use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::hid::Keyboard;
use crate::indicator;
use crate::profile::{PinId, SwitchBinding};
use crate::session::SessionTimer;
use embassy_time::Instant;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

/// One physical switch: its binding, its input pin, and its debounced state.
pub struct Switch<I> {
    binding: &'static SwitchBinding,
    input: I,
    state: SwitchState,
}

impl<I: InputPin> Switch<I> {
    pub fn binding(&self) -> &'static SwitchBinding {
        self.binding
    }

    pub fn is_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    /// Sample the pin. The input is pulled up, so a pressed switch reads low.
    fn sample(&mut self) -> Option<bool> {
        match self.input.is_low() {
            Ok(actuated) => Some(actuated),
            Err(_) => {
                warn!("SW{}: pin read failed", self.binding.id);
                None
            }
        }
    }
}

pub struct Hitbox<I, K, A, T> {
    switches: Vec<Switch<I>, MAX_SWITCHES>,
    dispatcher: Dispatcher<K, A>,
    session: SessionTimer,
    session_led: T,
}

impl<I, K, A, T> Hitbox<I, K, A, T>
where
    I: InputPin,
    K: Keyboard,
    A: OutputPin,
    T: OutputPin,
{
    /// Claim an input for every binding, in profile order. The first pin that can't be acquired
    /// aborts startup.
    pub fn new(
        bindings: &'static [SwitchBinding],
        mut acquire: impl FnMut(PinId) -> Result<I, Error>,
        dispatcher: Dispatcher<K, A>,
        session: SessionTimer,
        mut session_led: T,
    ) -> Result<Self, Error> {
        let mut switches = Vec::new();
        for binding in bindings {
            let input = acquire(binding.pin)?;
            switches
                .push(Switch { binding, input, state: SwitchState::new() })
                .map_err(|_| Error::TooManySwitches)?;
        }
        indicator::set(&mut session_led, false);

        Ok(Hitbox { switches, dispatcher, session, session_led })
    }

    pub fn switches(&self) -> &[Switch<I>] {
        &self.switches
    }

    pub fn session(&self) -> &SessionTimer {
        &self.session
    }

    pub fn keyboard(&self) -> &K {
        self.dispatcher.keyboard()
    }

    /// One loop iteration: advance the session timer, then sample every switch in profile order
    /// and dispatch any edge. Delivery failures are logged and don't stop the other switches.
    pub async fn tick(&mut self, now: Instant) {
        if self.session.poll(now).is_some() {
            indicator::set(&mut self.session_led, self.session.is_flashing());
        }

        for switch in self.switches.iter_mut() {
            let Some(actuated) = switch.sample() else { continue };
            let Some(edge) = switch.state.update(actuated) else { continue };

            let binding = switch.binding;
            let result = match edge {
                Edge::Press => {
                    info!("SW{} pressed", binding.id);
                    self.dispatcher.on_press(binding).await
                }
                Edge::Release => {
                    info!("SW{} released", binding.id);
                    self.dispatcher.on_release(binding).await
                }
            };
            if let Err(e) = result {
                warn!("SW{}: keyboard event not delivered: {}", binding.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HidError;
    use crate::hid::ReportKeyboard;
    use crate::keycode::KeyCode::*;
    use crate::profile::{self, Action};
    use crate::testing::{KeyEvent::*, MockLed, MockSwitch, RecordingKeyboard, RecordingSink};
    use embassy_futures::block_on;
    use embassy_time::Duration;

    const PROFILE: &[SwitchBinding] = &[
        SwitchBinding { id: 1, pin: 8, action: Action::Key(Space) },
        SwitchBinding { id: 2, pin: 7, action: Action::Combo(&[A, B]) },
        SwitchBinding { id: 3, pin: 6, action: Action::Text("ab\n") },
        SwitchBinding { id: 4, pin: 5, action: Action::Key(D) },
    ];

    struct Rig<K> {
        hitbox: Hitbox<MockSwitch, K, MockLed, MockLed>,
        switches: std::vec::Vec<MockSwitch>,
        activity: MockLed,
        session: MockLed,
    }

    impl<K: Keyboard> Rig<K> {
        fn new(keyboard: K) -> Self {
            let switches: std::vec::Vec<MockSwitch> = PROFILE.iter().map(|_| MockSwitch::default()).collect();
            let activity = MockLed::default();
            let session = MockLed::default();
            let pins = switches.clone();
            let hitbox = Hitbox::new(
                PROFILE,
                |pin| Ok(pins[PROFILE.iter().position(|b| b.pin == pin).unwrap()].clone()),
                Dispatcher::new(keyboard, activity.clone()),
                SessionTimer::new(Duration::from_secs(1800), Duration::from_secs(5), Instant::from_secs(0)),
                session.clone(),
            )
            .unwrap();
            Rig { hitbox, switches, activity, session }
        }

        fn tick(&mut self, secs: u64) {
            block_on(self.hitbox.tick(Instant::from_secs(secs)));
        }
    }

    fn recording() -> Rig<RecordingKeyboard> {
        Rig::new(RecordingKeyboard::default())
    }

    #[test]
    fn holding_a_key_presses_it_once() {
        let mut rig = recording();
        rig.switches[0].set(true);
        for _ in 0..10 {
            rig.tick(0);
        }
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space)]);
        assert!(rig.hitbox.switches()[0].is_pressed());
        assert!(rig.activity.is_lit());

        rig.switches[0].set(false);
        rig.tick(0);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space), Release(Space)]);
        assert!(!rig.activity.is_lit());
    }

    #[test]
    fn combo_fires_once_per_press_and_nothing_on_release() {
        let mut rig = recording();
        rig.switches[1].set(true);
        rig.tick(0);
        rig.tick(0);
        rig.switches[1].set(false);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(A), Press(B), Release(A), Release(B)]);
    }

    #[test]
    fn text_is_typed_once_per_press() {
        let mut rig = recording();
        let typed = [Press(A), Release(A), Press(B), Release(B), Press(Enter), Release(Enter)];

        rig.switches[2].set(true);
        rig.tick(0);
        rig.tick(0);
        rig.switches[2].set(false);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, typed);

        rig.switches[2].set(true);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events.len(), 2 * typed.len());
    }

    #[test]
    fn simultaneous_edges_dispatch_in_profile_order() {
        let mut rig = recording();
        rig.switches[3].set(true);
        rig.switches[0].set(true);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space), Press(D)]);

        rig.switches[0].set(false);
        rig.switches[3].set(false);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events[2..], [Release(Space), Release(D)]);
    }

    #[test]
    fn session_led_flashes_independently_of_switches() {
        let mut rig = recording();
        rig.tick(1799);
        assert!(!rig.session.is_lit());

        rig.switches[0].set(true);
        rig.tick(1800);
        assert!(rig.session.is_lit());
        assert_eq!(rig.hitbox.session().flash_end(), Some(Instant::from_secs(1805)));
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space)]);

        rig.switches[0].set(false);
        rig.tick(1802);
        assert!(rig.session.is_lit());
        assert_eq!(rig.hitbox.session().flash_end(), Some(Instant::from_secs(1805)));

        rig.tick(1805);
        assert!(!rig.session.is_lit());
        assert!(!rig.activity.is_lit());
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space), Release(Space)]);
    }

    #[test]
    fn undelivered_events_still_update_state() {
        let mut rig = Rig::new(RecordingKeyboard::failing(HidError::NotConfigured));
        rig.switches[0].set(true);
        rig.switches[3].set(true);
        rig.tick(0);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(Space), Press(D)]);
        assert!(rig.hitbox.switches()[0].is_pressed());
        assert!(rig.hitbox.switches()[3].is_pressed());
    }

    #[test]
    fn read_error_skips_the_switch_for_one_tick() {
        let mut rig = recording();
        rig.switches[0].set(true);
        rig.switches[0].set_broken(true);
        rig.switches[3].set(true);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(D)]);
        assert!(!rig.hitbox.switches()[0].is_pressed());

        rig.switches[0].set_broken(false);
        rig.tick(0);
        assert_eq!(rig.hitbox.keyboard().events, [Press(D), Press(Space)]);
    }

    #[test]
    fn reports_reach_the_sink_in_order() {
        let mut rig = Rig::new(ReportKeyboard::new(RecordingSink::default()));
        rig.switches[1].set(true);
        rig.tick(0);
        assert_eq!(
            rig.hitbox.keyboard().sink().reports,
            [
                (0, [0x04, 0, 0, 0, 0, 0]),
                (0, [0x04, 0x05, 0, 0, 0, 0]),
                (0, [0, 0x05, 0, 0, 0, 0]),
                (0, [0; 6]),
            ]
        );
    }

    #[test]
    fn acquisition_failure_aborts_startup() {
        let mut asked = std::vec::Vec::new();
        let result = Hitbox::<MockSwitch, _, _, _>::new(
            PROFILE,
            |pin| {
                asked.push(pin);
                if pin == 6 { Err(Error::PinUnavailable(pin)) } else { Ok(MockSwitch::default()) }
            },
            Dispatcher::new(RecordingKeyboard::default(), MockLed::default()),
            SessionTimer::new(Duration::from_secs(1), Duration::from_secs(1), Instant::from_secs(0)),
            MockLed::default(),
        );
        assert_eq!(result.err(), Some(Error::PinUnavailable(6)));
        assert_eq!(asked, [8, 7, 6]);
    }

    #[test]
    fn unknown_profile_acquires_no_pins() {
        let mut acquired = 0;
        let result = profile::load("fighting").and_then(|bindings| {
            Hitbox::<MockSwitch, _, _, _>::new(
                bindings,
                |_| {
                    acquired += 1;
                    Ok(MockSwitch::default())
                },
                Dispatcher::new(RecordingKeyboard::default(), MockLed::default()),
                SessionTimer::new(Duration::from_secs(1), Duration::from_secs(1), Instant::from_secs(0)),
                MockLed::default(),
            )
        });
        assert_eq!(result.err(), Some(Error::UnknownProfile));
        assert_eq!(acquired, 0);
    }
}
