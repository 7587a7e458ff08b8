/*
 * Created on Sat Aug 01 2026
 *
 * This file is a part of Wirelog
 * Wirelog is a free and open-source logger that turns a stream of
 * schema-drifting wire records into rotating CSV files with bounded
 * on-disk retention.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

#[cfg(unix)]
pub use unix::*;
#[cfg(windows)]
pub use windows::*;

#[cfg(unix)]
mod unix {
    use {
        std::{
            future::Future,
            io::Result as IoResult,
            pin::Pin,
            task::{Context, Poll},
        },
        tokio::signal::unix::{signal, Signal, SignalKind},
    };

    pub struct TerminationSignal {
        sigint: Signal,
        sigterm: Signal,
    }

    impl TerminationSignal {
        pub fn init() -> IoResult<Self> {
            let sigint = signal(SignalKind::interrupt())?;
            let sigterm = signal(SignalKind::terminate())?;
            Ok(Self { sigint, sigterm })
        }
    }

    impl Future for TerminationSignal {
        type Output = Option<()>;
        fn poll(mut self: Pin<&mut Self>, ctx: &mut Context<'_>) -> Poll<Self::Output> {
            let int = self.sigint.poll_recv(ctx);
            let term = self.sigterm.poll_recv(ctx);
            match (int, term) {
                // when either of them have closed or received a signal, return
                (Poll::Ready(p), _) | (_, Poll::Ready(p)) => Poll::Ready(p),
                _ => Poll::Pending,
            }
        }
    }

    /// Fires on every `SIGHUP`, which asks us to re-read our configuration
    pub struct ReloadSignal {
        sighup: Signal,
    }

    impl ReloadSignal {
        pub fn init() -> IoResult<Self> {
            Ok(Self {
                sighup: signal(SignalKind::hangup())?,
            })
        }
        pub async fn recv(&mut self) -> Option<()> {
            self.sighup.recv().await
        }
    }
}

#[cfg(windows)]
mod windows {
    use {
        std::{
            future::Future,
            io::Result as IoResult,
            pin::Pin,
            task::{Context, Poll},
        },
        tokio::signal::windows::{ctrl_break, ctrl_c, CtrlBreak, CtrlC},
    };

    pub struct TerminationSignal {
        ctrl_c: CtrlC,
        ctrl_break: CtrlBreak,
    }

    impl TerminationSignal {
        pub fn init() -> IoResult<Self> {
            let ctrl_c = ctrl_c()?;
            let ctrl_break = ctrl_break()?;
            Ok(Self { ctrl_c, ctrl_break })
        }
    }

    impl Future for TerminationSignal {
        type Output = Option<()>;
        fn poll(mut self: Pin<&mut Self>, ctx: &mut Context<'_>) -> Poll<Self::Output> {
            let ctrl_c = self.ctrl_c.poll_recv(ctx);
            let ctrl_break = self.ctrl_break.poll_recv(ctx);
            match (ctrl_c, ctrl_break) {
                // if any of them are ready or closed, simply return
                (Poll::Ready(p), _) | (_, Poll::Ready(p)) => Poll::Ready(p),
                _ => Poll::Pending,
            }
        }
    }

    /// There is no reload signal on Windows; this never fires
    pub struct ReloadSignal;

    impl ReloadSignal {
        pub fn init() -> IoResult<Self> {
            Ok(Self)
        }
        pub async fn recv(&mut self) -> Option<()> {
            std::future::pending().await
        }
    }
}
