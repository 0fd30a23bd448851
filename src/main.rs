use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use math_drill_gen::problem_engine::helpers::format_number;
use math_drill_gen::{
    logging, record_session, AppConfig, Countdown, Identity, JsonFileStore, RoundOutcome,
    ScoreStore, Session, SessionSummary, StaticIdentity,
};

#[tokio::main]
async fn main() -> Result<()> {
    // An optional TOML path as the only argument; MATH_DRILL_* vars override it.
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_toml_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => AppConfig::from_env().context("invalid MATH_DRILL_* environment")?,
    };
    logging::init(&config.log_level);

    let identity = StaticIdentity(
        config
            .player_name
            .as_ref()
            .map(|name| Identity::new(name.to_lowercase(), name.clone())),
    );
    let store = Arc::new(JsonFileStore::new(&config.store_path));

    let mut session = Session::new(config.game.clone());
    println!(
        "{} drill, {} tier. Three strikes and you're out. Answer with 1-4.",
        config.game.mode,
        session.tier()
    );

    let Some(summary) = play(&mut session).await? else {
        println!("\nBye.");
        return Ok(());
    };

    println!(
        "\nGame over. Score {}, level {}, best combo {}, {}/{} correct ({:.0}%).",
        summary.score,
        summary.level_reached,
        summary.best_combo,
        summary.correct_answers,
        summary.total_questions,
        summary.accuracy()
    );

    let save = {
        let store = Arc::clone(&store);
        let summary = summary.clone();
        tokio::task::spawn_blocking(move || record_session(&identity, store.as_ref(), &summary))
    };
    match save.await.context("score save task panicked")? {
        Ok(()) => println!("(score saved to {})", store.path().display()),
        Err(err) => println!("(score not saved: {err})"),
    }

    let limit = config.leaderboard_limit;
    let board = tokio::task::spawn_blocking(move || store.leaderboard(limit))
        .await
        .context("leaderboard task panicked")?;
    match board {
        Ok(rows) if !rows.is_empty() => {
            println!("\nLeaderboard");
            for (rank, row) in rows.iter().enumerate() {
                println!(
                    "{:>3}. {:<20} {:>7}  lvl {:<3} combo {:<3} games {}",
                    rank + 1,
                    row.display_name,
                    row.best_score,
                    row.best_level,
                    row.best_combo,
                    row.total_games_played
                );
            }
        }
        Ok(_) => {}
        Err(err) => warn!(error = %err, "could not load leaderboard"),
    }
    Ok(())
}

/// Play rounds until game over. `None` if stdin closes first.
async fn play(session: &mut Session) -> Result<Option<SessionSummary>> {
    let (expired_tx, mut expired_rx) = mpsc::unbounded_channel::<u64>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let round = session.start_round()?;
        println!(
            "\n[{}s] {}   (score {}, level {}, strikes {}/{})",
            round.time_limit.as_secs(),
            round.generated.problem.question,
            session.state().score,
            session.state().level,
            session.state().strikes,
            session.state().strike_limit
        );
        let options = *round.generated.options.values();
        for (i, value) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, format_number(*value));
        }

        let tx = expired_tx.clone();
        let round_id = round.id;
        let countdown = Countdown::start(round.time_limit, move || {
            let _ = tx.send(round_id);
        });
        let started = Instant::now();

        let report = loop {
            tokio::select! {
                Some(id) = expired_rx.recv() => match session.time_out(id) {
                    Ok(report) => break report,
                    Err(err) => debug!(%err, "ignoring expiry"),
                },
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read stdin")? else {
                        countdown.cancel();
                        return Ok(None);
                    };
                    let Some(selected) = line
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| options.get(i).copied())
                    else {
                        println!("Pick 1-4.");
                        continue;
                    };
                    if !countdown.cancel() {
                        // Expired while typing; the pending expiry resolves the round.
                        continue;
                    }
                    let left = round.time_limit.saturating_sub(started.elapsed()).as_secs();
                    let left = u32::try_from(left).unwrap_or(u32::MAX);
                    break session.submit_answer(round.id, selected, left)?;
                }
            }
        };

        match report.outcome {
            RoundOutcome::Correct { points, leveled_up } => {
                print!("Correct! +{points}");
                if leveled_up {
                    print!("  Level {}!", report.state.level);
                }
                println!();
            }
            RoundOutcome::Incorrect { correct_answer } => {
                println!("Wrong, it was {}.", format_number(correct_answer));
            }
            RoundOutcome::TimedOut { correct_answer } => {
                println!("Time's up! It was {}.", format_number(correct_answer));
            }
        }

        if let Some(summary) = report.summary {
            return Ok(Some(summary));
        }
    }
}
