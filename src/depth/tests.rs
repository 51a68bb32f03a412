//! Unit tests for the ranking engine and chart assembly

use super::*;
use crate::cli::types::{PlayerId, PlayerNumber, PositionId, Rank, TeamId};
use crate::error::{DepthChartError, Result};
use crate::storage::{
    Assignment, DepthChartDatabase, Player, Position, RankedPlayer, SqliteSession,
};

struct Roster {
    db: DepthChartDatabase,
    team: TeamId,
    qb: PositionId,
    wr: PositionId,
    brady: PlayerId,
    gabbert: PlayerId,
    trask: PlayerId,
    evans: PlayerId,
}

fn create_roster() -> Roster {
    let db = DepthChartDatabase::new_in_memory().unwrap();
    let sport = db.insert_sport("NFL").unwrap();
    let team = db.insert_team(sport, "Tampa Bay Buccaneers").unwrap();
    let qb = db.insert_position(team, "QB").unwrap();
    let wr = db.insert_position(team, "WR").unwrap();
    let brady = db
        .insert_player(team, PlayerNumber::new(12), "Tom Brady", Some("+500"))
        .unwrap();
    let gabbert = db
        .insert_player(team, PlayerNumber::new(11), "Blaine Gabbert", None)
        .unwrap();
    let trask = db
        .insert_player(team, PlayerNumber::new(2), "Kyle Trask", None)
        .unwrap();
    let evans = db
        .insert_player(team, PlayerNumber::new(13), "Mike Evans", None)
        .unwrap();

    Roster {
        db,
        team,
        qb,
        wr,
        brady,
        gabbert,
        trask,
        evans,
    }
}

/// Player ids at a position in rank order
fn ranked_ids(db: &DepthChartDatabase, position: PositionId) -> Vec<(PlayerId, u32)> {
    db.snapshot()
        .unwrap()
        .list_assignments(position)
        .unwrap()
        .into_iter()
        .map(|a| (a.player_id, a.rank.as_u32()))
        .collect()
}

fn numbers(players: &[Player]) -> Vec<u32> {
    players.iter().map(|p| p.number.as_u32()).collect()
}

#[test]
fn test_insert_without_rank_appends() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    let first = engine.insert(r.qb, r.brady, None).unwrap();
    let second = engine.insert(r.qb, r.gabbert, None).unwrap();

    assert_eq!(first.rank, Rank::STARTER);
    assert_eq!(second.rank, Rank::new(1));
}

#[test]
fn test_insert_at_occupied_rank_shifts_down() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, Some(Rank::new(0))).unwrap();
    engine.insert(r.qb, r.gabbert, Some(Rank::new(1))).unwrap();
    engine.insert(r.qb, r.trask, Some(Rank::new(1))).unwrap();

    assert_eq!(
        ranked_ids(&r.db, r.qb),
        vec![(r.brady, 0), (r.trask, 1), (r.gabbert, 2)]
    );
}

#[test]
fn test_insert_at_starter_shifts_everyone() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    let trask = engine.insert(r.qb, r.trask, Some(Rank::STARTER)).unwrap();

    assert_eq!(trask.rank, Rank::STARTER);
    assert_eq!(
        ranked_ids(&r.db, r.qb),
        vec![(r.trask, 0), (r.brady, 1), (r.gabbert, 2)]
    );
}

#[test]
fn test_insert_past_bottom_is_clamped() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    let gabbert = engine.insert(r.qb, r.gabbert, Some(Rank::new(7))).unwrap();

    assert_eq!(gabbert.rank, Rank::new(1));
}

#[test]
fn test_positions_rank_independently() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    let wr = engine.insert(r.wr, r.brady, None).unwrap();
    engine.insert(r.wr, r.evans, Some(Rank::STARTER)).unwrap();

    assert_eq!(wr.rank, Rank::STARTER);
    assert_eq!(ranked_ids(&r.db, r.qb), vec![(r.brady, 0)]);
    assert_eq!(ranked_ids(&r.db, r.wr), vec![(r.evans, 0), (r.brady, 1)]);
}

#[test]
fn test_duplicate_rejected_by_default() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    let result = engine.insert(r.qb, r.brady, Some(Rank::new(1)));

    match result {
        Err(DepthChartError::DuplicateAssignment {
            position_id,
            player_id,
        }) => {
            assert_eq!(position_id, r.qb);
            assert_eq!(player_id, r.brady);
        }
        other => panic!("Expected DuplicateAssignment, got {:?}", other),
    }
    assert_eq!(ranked_ids(&r.db, r.qb), vec![(r.brady, 0), (r.gabbert, 1)]);
}

#[test]
fn test_duplicate_repositioned_when_allowed() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine =
        RankingEngine::new(&r.db, &locks).with_duplicate_policy(DuplicatePolicy::Reposition);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    engine.insert(r.qb, r.trask, None).unwrap();
    let moved = engine.insert(r.qb, r.brady, Some(Rank::new(2))).unwrap();

    assert_eq!(moved.rank, Rank::new(2));
    assert_eq!(
        ranked_ids(&r.db, r.qb),
        vec![(r.gabbert, 0), (r.trask, 1), (r.brady, 2)]
    );
}

#[test]
fn test_insert_unknown_position_or_player() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    let err = engine.insert(PositionId::new(999), r.brady, None).unwrap_err();
    assert!(err.is_not_found());

    let err = engine.insert(r.qb, PlayerId::new(999), None).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unknown_position_registers_no_lock() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);
    let missing = PositionId::new(999);

    assert!(engine.insert(missing, r.brady, None).unwrap_err().is_not_found());
    assert!(engine.remove(missing, r.brady).unwrap_err().is_not_found());
    assert!(engine.backups(missing, r.brady).unwrap_err().is_not_found());
    assert!(locks.is_empty());

    engine.insert(r.qb, r.brady, None).unwrap();
    assert_eq!(locks.len(), 1);
}

#[test]
fn test_insert_player_from_other_team_rejected() {
    let r = create_roster();
    let sport = r.db.insert_sport("NFL").unwrap();
    let other_team = r.db.insert_team(sport, "Green Bay Packers").unwrap();
    let rodgers = r
        .db
        .insert_player(other_team, PlayerNumber::new(12), "Aaron Rodgers", None)
        .unwrap();

    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);
    let err = engine.insert(r.qb, rodgers, None).unwrap_err();

    assert!(err.is_not_found());
    assert!(ranked_ids(&r.db, r.qb).is_empty());
}

#[test]
fn test_remove_compacts_ranks() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    engine.insert(r.qb, r.trask, None).unwrap();

    assert!(engine.remove(r.qb, r.brady).unwrap());
    assert_eq!(ranked_ids(&r.db, r.qb), vec![(r.gabbert, 0), (r.trask, 1)]);
}

#[test]
fn test_remove_absent_is_noop() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();

    assert!(!engine.remove(r.qb, r.gabbert).unwrap());
    assert!(!engine.remove(r.wr, r.brady).unwrap());
    assert_eq!(ranked_ids(&r.db, r.qb), vec![(r.brady, 0)]);
}

#[test]
fn test_append_after_remove_reuses_bottom_rank() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    engine.remove(r.qb, r.brady).unwrap();
    let trask = engine.insert(r.qb, r.trask, None).unwrap();

    assert_eq!(trask.rank, Rank::new(1));
}

#[test]
fn test_backups_are_players_ranked_below() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();
    engine.insert(r.qb, r.gabbert, None).unwrap();
    engine.insert(r.qb, r.trask, None).unwrap();

    assert_eq!(numbers(&engine.backups(r.qb, r.brady).unwrap()), vec![11, 2]);
    assert_eq!(numbers(&engine.backups(r.qb, r.gabbert).unwrap()), vec![2]);
    assert!(engine.backups(r.qb, r.trask).unwrap().is_empty());
}

#[test]
fn test_backups_for_unassigned_player_is_empty() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.brady, None).unwrap();

    assert!(engine.backups(r.qb, r.evans).unwrap().is_empty());
    assert!(engine.backups(r.wr, r.brady).unwrap().is_empty());
}

#[test]
fn test_full_chart_keeps_empty_positions() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    engine.insert(r.qb, r.gabbert, None).unwrap();
    engine.insert(r.qb, r.brady, Some(Rank::STARTER)).unwrap();

    let chart = engine.full_chart(r.team).unwrap();
    assert_eq!(chart.position_names().collect::<Vec<_>>(), vec!["QB", "WR"]);
    assert_eq!(numbers(chart.get("QB").unwrap()), vec![12, 11]);
    assert!(chart.get("WR").unwrap().is_empty());
    assert!(chart.get("qb").is_none());
}

#[test]
fn test_full_chart_unknown_team() {
    let r = create_roster();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    let err = engine.full_chart(TeamId::new(404)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_full_chart_team_without_positions() {
    let r = create_roster();
    let sport = r.db.insert_sport("NFL").unwrap();
    let empty = r.db.insert_team(sport, "Expansion Team").unwrap();
    let locks = PositionLocks::new();
    let engine = RankingEngine::new(&r.db, &locks);

    let chart = engine.full_chart(empty).unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.lines(), vec![NO_LIST.to_string()]);
}

#[test]
fn test_verify_ranks_accepts_contiguous() {
    let pos = PositionId::new(1);
    let assignments = vec![
        Assignment::new(pos, PlayerId::new(5), Rank::new(0)),
        Assignment::new(pos, PlayerId::new(6), Rank::new(1)),
    ];
    assert!(engine::verify_ranks(pos, &assignments).is_ok());
    assert!(engine::verify_ranks(pos, &[]).is_ok());
}

#[test]
fn test_verify_ranks_reports_shared_rank() {
    let pos = PositionId::new(1);
    let assignments = vec![
        Assignment::new(pos, PlayerId::new(5), Rank::new(0)),
        Assignment::new(pos, PlayerId::new(6), Rank::new(1)),
        Assignment::new(pos, PlayerId::new(7), Rank::new(1)),
    ];

    match engine::verify_ranks(pos, &assignments) {
        Err(DepthChartError::InvariantViolation { message }) => {
            assert!(message.contains("held by players 6, 7"));
        }
        other => panic!("Expected InvariantViolation, got {:?}", other),
    }
}

#[test]
fn test_verify_ranks_reports_gap() {
    let pos = PositionId::new(1);
    let assignments = vec![
        Assignment::new(pos, PlayerId::new(5), Rank::new(0)),
        Assignment::new(pos, PlayerId::new(6), Rank::new(2)),
    ];

    match engine::verify_ranks(pos, &assignments) {
        Err(DepthChartError::InvariantViolation { message }) => {
            assert!(message.contains("expected rank 1 but found 2"));
        }
        other => panic!("Expected InvariantViolation, got {:?}", other),
    }
}

#[test]
fn test_assemble_sorts_by_position_then_rank() {
    let team = TeamId::new(1);
    let player = |id: i64, number: u32| Player {
        player_id: PlayerId::new(id),
        team_id: team,
        number: PlayerNumber::new(number),
        name: format!("Player {}", number),
        odds: None,
    };
    let positions = vec![
        Position {
            position_id: PositionId::new(2),
            team_id: team,
            name: "WR".to_string(),
        },
        Position {
            position_id: PositionId::new(1),
            team_id: team,
            name: "QB".to_string(),
        },
    ];
    let ranked = vec![
        RankedPlayer {
            position_id: PositionId::new(1),
            rank: Rank::new(1),
            player: player(1, 11),
        },
        RankedPlayer {
            position_id: PositionId::new(1),
            rank: Rank::new(0),
            player: player(2, 12),
        },
        RankedPlayer {
            position_id: PositionId::new(9),
            rank: Rank::new(0),
            player: player(3, 99),
        },
    ];

    let chart = chart::assemble(team, &positions, ranked);

    assert_eq!(
        chart.lines(),
        vec![
            "QB - (#12, Player 12), (#11, Player 11)".to_string(),
            "WR - ".to_string(),
        ]
    );
}

/// Store whose sessions fail when writing one chosen player's assignment,
/// after any rank shifts for that insert were already written.
struct FailingStore {
    db: DepthChartDatabase,
    fail_on: PlayerId,
}

struct FailingSession<'a> {
    inner: SqliteSession<'a>,
    fail_on: PlayerId,
}

impl RecordStore for FailingStore {
    type Session<'a> = FailingSession<'a>;

    fn begin(&self) -> Result<FailingSession<'_>> {
        Ok(FailingSession {
            inner: self.db.begin()?,
            fail_on: self.fail_on,
        })
    }

    fn snapshot(&self) -> Result<FailingSession<'_>> {
        Ok(FailingSession {
            inner: self.db.snapshot()?,
            fail_on: self.fail_on,
        })
    }
}

impl RecordSession for FailingSession<'_> {
    fn team_exists(&self, team_id: TeamId) -> Result<bool> {
        self.inner.team_exists(team_id)
    }

    fn get_position(&self, position_id: PositionId) -> Result<Option<Position>> {
        self.inner.get_position(position_id)
    }

    fn list_positions(&self, team_id: TeamId) -> Result<Vec<Position>> {
        self.inner.list_positions(team_id)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        self.inner.get_player(player_id)
    }

    fn find_assignment(
        &self,
        position_id: PositionId,
        player_id: PlayerId,
    ) -> Result<Option<Assignment>> {
        self.inner.find_assignment(position_id, player_id)
    }

    fn list_assignments(&self, position_id: PositionId) -> Result<Vec<Assignment>> {
        self.inner.list_assignments(position_id)
    }

    fn list_team_assignments(&self, team_id: TeamId) -> Result<Vec<RankedPlayer>> {
        self.inner.list_team_assignments(team_id)
    }

    fn upsert_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        if assignment.player_id == self.fail_on {
            return Err(DepthChartError::invariant("injected store failure"));
        }
        self.inner.upsert_assignment(assignment)
    }

    fn delete_assignment(&mut self, position_id: PositionId, player_id: PlayerId) -> Result<bool> {
        self.inner.delete_assignment(position_id, player_id)
    }

    fn commit(self) -> Result<()> {
        self.inner.commit()
    }
}

#[test]
fn test_failed_insert_rolls_back_shift() {
    let r = create_roster();
    let locks = PositionLocks::new();
    {
        let engine = RankingEngine::new(&r.db, &locks);
        engine.insert(r.qb, r.brady, None).unwrap();
        engine.insert(r.qb, r.gabbert, None).unwrap();
    }

    let store = FailingStore {
        db: r.db,
        fail_on: r.trask,
    };
    let engine = RankingEngine::new(&store, &locks);
    let err = engine.insert(r.qb, r.trask, Some(Rank::STARTER)).unwrap_err();

    assert!(matches!(err, DepthChartError::InvariantViolation { .. }));
    assert_eq!(
        ranked_ids(&store.db, r.qb),
        vec![(r.brady, 0), (r.gabbert, 1)]
    );
}
