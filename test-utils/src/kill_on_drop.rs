use std::ops::{Deref, DerefMut};
use std::process::Child;
use std::thread;
use std::time::Instant;
use crate::constants::{KILL_CHECK_INTERVAL, TERM_WAIT};
use crate::process::ChildKillTermExt;

/// Stops the child with SIGTERM when dropped, with SIGKILL if it doesn't
/// stop in time.
#[derive(Debug)]
pub struct KillOnDropChild(Option<Child>);

impl Drop for KillOnDropChild {
    fn drop(&mut self) {
        let Some(ref mut child) = self.0 else {
            return
        };

        match child.try_wait() {
            Ok(Some(_)) => return,
            Err(e) => {
                eprintln!("failed checking child process's status: {e}");
                return
            },
            _ => ()
        }

        let id = child.id();

        if let Err(e) = child.kill_term() {
            eprintln!(
                "leaking child process {id} due to failure \
                    to send SIGTERM: {e}",
            );
            return
        }

        let wait_start = Instant::now();
        while wait_start.elapsed() < TERM_WAIT {
            match child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) => thread::sleep(KILL_CHECK_INTERVAL),
                Err(e) => {
                    eprintln!("failed waiting for child process: {e}");
                    return
                }
            }
        }

        eprintln!(
            "child process {id} refused to stop in {} milliseconds, killing",
            TERM_WAIT.as_millis(),
        );

        if let Err(e) = child.kill() {
            eprintln!(
                "leaking child process {id} due to failure \
                    to send SIGKILL: {e}",
            );
        }
    }
}

impl Deref for KillOnDropChild {
    type Target = Child;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
            .expect("invalid KillOnDropChild with None wrapped")
    }
}

impl DerefMut for KillOnDropChild {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
            .expect("invalid KillOnDropChild with None wrapped")
    }
}

pub trait ChildKillOnDropExt {
    fn kill_on_drop(self) -> KillOnDropChild;
}
impl ChildKillOnDropExt for Child {
    fn kill_on_drop(self) -> KillOnDropChild {
        KillOnDropChild(Some(self))
    }
}
