//! Scripted playthrough that drives the runtime through its public handle.
//!
//! Each level: walk to the first NPC and listen, solve the terminal puzzle,
//! then walk right into the exit zone. Every stage is bounded by
//! [`CliConfig::stage_timeout`].
use anyhow::{Context, Result, bail};
use game_core::PuzzleId;
use runtime::{ProgressionState, RuntimeHandle, SessionSnapshot, Subview};
use tracing::{info, warn};

use crate::campaign::Campaign;
use crate::config::CliConfig;

/// Stop walking towards an NPC past this point.
const NPC_SEARCH_LIMIT_X: f32 = 600.0;

pub struct Script<'a> {
    handle: RuntimeHandle,
    campaign: &'a Campaign,
    config: &'a CliConfig,
}

impl<'a> Script<'a> {
    pub fn new(handle: RuntimeHandle, campaign: &'a Campaign, config: &'a CliConfig) -> Self {
        Self {
            handle,
            campaign,
            config,
        }
    }

    pub async fn run(self) -> Result<SessionSnapshot> {
        loop {
            let snapshot = self.handle.query_snapshot().await?;
            if snapshot.state == ProgressionState::Finished {
                return Ok(snapshot);
            }
            self.play_level(snapshot.level.order_number).await?;
        }
    }

    async fn play_level(&self, order_number: u32) -> Result<()> {
        info!(target: "client::script", level = order_number, "playing level");
        self.talk_to_nearest_npc().await?;
        self.solve_terminal().await?;
        self.walk_to_exit(order_number).await
    }

    async fn talk_to_nearest_npc(&self) -> Result<()> {
        self.handle.set_key_right(true);
        let reached = self
            .wait(|s| s.interaction_hint.is_some() || s.player.position.x >= NPC_SEARCH_LIMIT_X)
            .await;
        self.handle.set_key_right(false);

        if reached?.interaction_hint.is_none() {
            info!(target: "client::script", "nobody to talk to");
            return Ok(());
        }

        self.handle.set_key_space(true);
        let opened = self.wait(|s| s.state.subview().is_some()).await;
        self.handle.set_key_space(false);
        opened?;

        self.wait(|s| s.state.is_running()).await?;
        Ok(())
    }

    async fn solve_terminal(&self) -> Result<()> {
        self.handle.open_terminal().await?;
        let snapshot = self.handle.query_snapshot().await?;

        let Some(Subview::Terminal {
            puzzle_id: Some(puzzle_id),
        }) = snapshot.state.subview()
        else {
            info!(target: "client::script", "no puzzle on this level");
            self.handle.close_subview().await?;
            return Ok(());
        };

        let source = self.solution_for(puzzle_id).await?;
        let result = self.handle.submit_solution(puzzle_id, source).await?;
        self.handle.close_subview().await?;

        if !result.is_valid {
            warn!(target: "client::script", %puzzle_id, message = %result.message, "submission rejected");
            bail!("puzzle {puzzle_id} was not solved: {}", result.message);
        }
        info!(
            target: "client::script",
            %puzzle_id,
            points = result.points_earned,
            message = %result.message,
            "submission accepted"
        );
        Ok(())
    }

    async fn walk_to_exit(&self, order_number: u32) -> Result<()> {
        self.handle.set_key_right(true);
        let done = self
            .wait(|s| s.level.order_number != order_number || s.state == ProgressionState::Finished)
            .await;
        self.handle.set_key_right(false);
        done.map(|_| ())
    }

    async fn solution_for(&self, puzzle_id: PuzzleId) -> Result<String> {
        if let Some(dir) = &self.config.solutions_dir
            && let Some(puzzle) = self.campaign.puzzles.iter().find(|p| p.id == puzzle_id)
        {
            let path = dir.join(format!("{}.java", puzzle.title));
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()));
            }
        }

        self.campaign
            .solution(puzzle_id)
            .map(str::to_string)
            .with_context(|| format!("no solution known for puzzle {puzzle_id}"))
    }

    async fn wait(
        &self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot> {
        let mut rx = self.handle.watch_snapshot();
        let snapshot = tokio::time::timeout(self.config.stage_timeout, rx.wait_for(predicate))
            .await
            .context("scripted stage timed out")?
            .context("runtime stopped")?;
        Ok(snapshot.clone())
    }
}
