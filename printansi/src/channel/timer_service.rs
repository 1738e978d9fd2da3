// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{TickOutcome, channel_constants::TICK_PERIOD, output_channel::ChannelShared};
use std::{sync::Weak, time::Duration};
use tokio::{runtime::Handle,
            sync::broadcast,
            time::{Instant, MissedTickBehavior, interval_at}};

/// Drives [`crate::OutputChannel::tick()`] once per period on a tokio task.
///
/// - The task is spawned when the channel opens (see [`Self::register()`]), and exits
///   on its own when a tick finds the channel closed. The next open spawns a new one.
/// - [`Self::shutdown()`] stops every task spawned by this service.
///
/// The tick runs on the runtime while the writer runs on a blocking thread. A tick never
/// waits for the writer: if the channel is busy, the tick only counts itself.
#[derive(Debug)]
pub struct TimerService {
    runtime: Handle,
    period: Duration,
    shutdown_sender: broadcast::Sender<()>,
}

impl TimerService {
    #[must_use]
    pub fn new(runtime: Handle) -> Self { Self::new_with_period(runtime, TICK_PERIOD) }

    #[must_use]
    pub fn new_with_period(runtime: Handle, period: Duration) -> Self {
        let (shutdown_sender, _) = broadcast::channel::<()>(1);
        Self {
            runtime,
            period,
            shutdown_sender,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration { self.period }

    /// Spawn the ticking task for `channel`. The task only holds a [`Weak`] reference so
    /// it never keeps a dropped channel alive.
    pub(crate) fn register(&self, channel: Weak<ChannelShared>) {
        let mut shutdown_receiver = self.shutdown_sender.subscribe();
        let period = self.period;

        self.runtime.spawn(async move {
            // The first tick of a plain `interval` completes immediately, which would
            // count the open itself as a tick.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    // This branch is cancel safe because recv is cancel safe.
                    _ = shutdown_receiver.recv() => {
                        tracing::debug!(message = "timer shut down");
                        break;
                    }

                    // This branch is cancel safe because tick is cancel safe.
                    _ = interval.tick() => {
                        let Some(channel) = channel.upgrade() else {
                            break;
                        };
                        if let TickOutcome::Unregister = ChannelShared::on_tick(&channel) {
                            tracing::debug!(message = "channel closed, timer unregistered");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Stop all ticking tasks. Safe to call more than once.
    pub fn shutdown(&self) {
        // We don't care about the result, there may be no task running.
        self.shutdown_sender.send(()).ok();
    }
}
