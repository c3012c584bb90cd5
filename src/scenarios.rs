// src/scenarios.rs

use uuid::Uuid;

use crate::client::CalcClient;
use crate::console;
use crate::errors::Result;
use crate::poller::Poller;

/// Pass/fail bookkeeping for one scenario group. Owned by the group that
/// created it and never shared.
#[derive(Debug, Default)]
pub struct Tally {
    attempted: u32,
    passed: u32,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn passed(&self) -> u32 {
        self.passed
    }

    /// Asserts that a call succeeded and hands its value to the rest of the
    /// group. `None` means the group should abort.
    pub fn expect_ok<T>(&mut self, label: &str, outcome: Result<T>) -> Option<T> {
        self.attempted += 1;
        match outcome {
            Ok(value) => {
                console::pass(&format!("✓ {}", label));
                self.passed += 1;
                Some(value)
            }
            Err(err) => {
                console::fail(&format!("✗ {}: {}", label, err));
                None
            }
        }
    }

    /// Asserts that a call was rejected; any failure kind qualifies. An
    /// unexpected success is recorded as a miss but does not abort the group.
    pub fn expect_rejected<T>(&mut self, label: &str, outcome: Result<T>) {
        self.attempted += 1;
        match outcome {
            Err(err) => {
                log::debug!("{} rejected as expected: {}", label, err);
                console::pass(&format!("✓ {}", label));
                self.passed += 1;
            }
            Ok(_) => console::fail(&format!("✗ {}: call unexpectedly succeeded", label)),
        }
    }

    /// Plain boolean assertion on an already-obtained value.
    pub fn check(&mut self, label: &str, condition: bool) {
        self.attempted += 1;
        if condition {
            console::pass(&format!("✓ {}", label));
            self.passed += 1;
        } else {
            console::fail(&format!("✗ {}", label));
        }
    }

    /// Prints the group summary line.
    pub fn report(&self) {
        println!("Passed: ({}/{})\n", self.passed, self.attempted);
    }
}

/// Everything a scenario group needs: the client, the poller and the
/// credentials minted for this run.
pub struct ScenarioCtx {
    pub client: CalcClient,
    pub poller: Poller,
    pub login: String,
    pub password: String,
}

impl ScenarioCtx {
    pub fn new(client: CalcClient, poller: Poller) -> Self {
        Self {
            client,
            poller,
            // fresh login every run; the duplicate-registration check needs
            // the first attempt to succeed
            login: format!("e2e-{}", Uuid::new_v4().simple()),
            password: "password123".to_string(),
        }
    }
}

/// Registration: a fresh login is accepted, an empty or duplicate one is not.
pub async fn registration(ctx: &ScenarioCtx) -> Tally {
    console::bold("Registration:");
    let mut tally = Tally::new();

    let registered = tally.expect_ok(
        "new user registered",
        ctx.client.register(&ctx.login, &ctx.password).await,
    );
    if registered.is_none() {
        return tally;
    }

    tally.expect_rejected(
        "empty login rejected",
        ctx.client.register("", &ctx.password).await,
    );
    tally.expect_rejected(
        "duplicate login rejected",
        ctx.client.register(&ctx.login, &ctx.password).await,
    );

    tally
}

/// Authorization: correct credentials yield a token, bad ones do not.
pub async fn authorization(ctx: &ScenarioCtx) -> Tally {
    console::bold("Authorization:");
    let mut tally = Tally::new();

    let Some(_token) = tally.expect_ok(
        "login with correct credentials",
        ctx.client.login(&ctx.login, &ctx.password).await,
    ) else {
        return tally;
    };

    tally.expect_rejected(
        "wrong password rejected",
        ctx.client.login(&ctx.login, "wrongpassword").await,
    );
    tally.expect_rejected(
        "unknown user rejected",
        ctx.client.login("nonexistentuser", &ctx.password).await,
    );

    tally
}

/// Submission: a logged-in user can queue an expression; a garbage token
/// cannot.
pub async fn submission(ctx: &ScenarioCtx) -> Tally {
    console::bold("Sending for calculation:");
    let mut tally = Tally::new();

    let Some(token) =
        tally.expect_ok("login", ctx.client.login(&ctx.login, &ctx.password).await)
    else {
        return tally;
    };

    let Some(id) = tally.expect_ok(
        "expression accepted for calculation",
        ctx.client.calculate("2+2", &token).await,
    ) else {
        return tally;
    };
    tally.check("submission returned a job id", !id.is_empty());

    tally.expect_rejected(
        "garbage token rejected",
        ctx.client.calculate("2+2", "not-a-real-token").await,
    );

    tally
}

/// Result: an expression runs to completion and yields the right number.
pub async fn result(ctx: &ScenarioCtx) -> Tally {
    console::bold("Get expression result:");
    let mut tally = Tally::new();

    let Some(token) =
        tally.expect_ok("login", ctx.client.login(&ctx.login, &ctx.password).await)
    else {
        return tally;
    };
    let Some(id) = tally.expect_ok(
        "expression accepted for calculation",
        ctx.client.calculate("2+2", &token).await,
    ) else {
        return tally;
    };

    console::note("waiting for the orchestrator to finish...");
    let Some(value) = tally.expect_ok(
        "result became available",
        ctx.poller.wait_for_result(&ctx.client, &id, &token).await,
    ) else {
        return tally;
    };
    tally.check("2+2 evaluated to 4", (value - 4.0).abs() < f64::EPSILON);

    tally
}

/// Listing: a submitted job shows up in the full expression listing.
pub async fn listing(ctx: &ScenarioCtx) -> Tally {
    console::bold("List expressions:");
    let mut tally = Tally::new();

    let Some(token) =
        tally.expect_ok("login", ctx.client.login(&ctx.login, &ctx.password).await)
    else {
        return tally;
    };
    let Some(id) = tally.expect_ok(
        "expression accepted for calculation",
        ctx.client.calculate("3*3", &token).await,
    ) else {
        return tally;
    };

    let Some(all) = tally.expect_ok("listing fetched", ctx.client.expressions(&token).await)
    else {
        return tally;
    };
    tally.check(
        "submitted job appears in the listing",
        all.iter().any(|e| e.id == id),
    );

    tally
}

/// Runs every scenario group in order and returns the overall
/// (passed, attempted) totals.
pub async fn run_all(ctx: &ScenarioCtx) -> (u32, u32) {
    let mut passed = 0;
    let mut attempted = 0;

    for tally in [
        registration(ctx).await,
        authorization(ctx).await,
        submission(ctx).await,
        result(ctx).await,
        listing(ctx).await,
    ] {
        tally.report();
        passed += tally.passed();
        attempted += tally.attempted();
    }

    (passed, attempted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;

    #[test]
    fn tally_counts_expectation_matches() {
        let mut tally = Tally::new();

        assert!(tally.expect_ok("call succeeds", Ok::<_, ClientError>(1)).is_some());
        tally.expect_rejected(
            "call rejected",
            Err::<(), _>(ClientError::BadRequest { body: "no".into() }),
        );
        // a call that should have failed but did not
        tally.expect_rejected("call slipped through", Ok::<_, ClientError>(2));
        tally.check("condition holds", true);
        tally.check("condition broken", false);

        assert_eq!(tally.attempted(), 5);
        assert_eq!(tally.passed(), 3);
    }

    #[test]
    fn failed_expectation_returns_none() {
        let mut tally = Tally::new();
        let got = tally.expect_ok(
            "doomed call",
            Err::<(), _>(ClientError::NotFound { body: "gone".into() }),
        );
        assert!(got.is_none());
        assert_eq!(tally.attempted(), 1);
        assert_eq!(tally.passed(), 0);
    }

    #[test]
    fn attempted_never_drops_below_passed() {
        let mut tally = Tally::new();

        for i in 0u32..60 {
            match i % 3 {
                0 => {
                    let _ = tally.expect_ok("sometimes ok", mixed_outcome(i));
                }
                1 => tally.expect_rejected("sometimes rejected", mixed_outcome(i)),
                _ => tally.check("sometimes true", i % 4 == 0),
            }
            assert!(tally.attempted() >= tally.passed());
        }
    }

    fn mixed_outcome(i: u32) -> crate::errors::Result<u32> {
        if i % 2 == 0 {
            Ok(i)
        } else {
            Err(ClientError::Unauthorized { body: "denied".into() })
        }
    }
}
