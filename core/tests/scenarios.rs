use sapper_core::*;

fn safe_cells_revealed<G: MineGenerator>(engine: &Engine<G>) -> usize {
    engine
        .board()
        .iter()
        .filter(|cell| cell.revealed && !cell.is_mine())
        .count()
}

#[test]
fn first_click_is_never_a_mine() {
    let difficulty = Preset::Easy.difficulty();

    for seed in 0..500 {
        let mut engine =
            Engine::with_generator(difficulty, RandomMineGenerator::from_seed_u64(seed)).unwrap();

        let outcome = engine.reveal((0, 0));

        assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}");
        assert!(!engine.cell_at((0, 0)).unwrap().is_mine());
        let mines = engine.board().iter().filter(|cell| cell.is_mine()).count();
        assert_eq!(mines, usize::from(difficulty.mines));
    }
}

#[test]
fn entropy_seeded_engine_keeps_first_click_safe() {
    for preset in Preset::ALL {
        let mut engine = Engine::new(preset.difficulty()).unwrap();
        assert_eq!(engine.status(), GameStatus::Pending);
        assert!(!engine.mines_armed());

        engine.reveal((5, 5));

        assert!(engine.mines_armed());
        assert!(!engine.cell_at((5, 5)).unwrap().is_mine());
        assert_ne!(engine.status(), GameStatus::Lost);
    }
}

#[test]
fn adjacency_counts_match_neighbors() {
    let difficulty = Preset::Hard.difficulty();
    let mut engine =
        Engine::with_generator(difficulty, RandomMineGenerator::from_seed_u64(3)).unwrap();
    engine.reveal((8, 15));

    let board = engine.board();
    for ((row, col), cell) in board.indexed_iter() {
        let CellContent::Adjacent(count) = cell.content else {
            continue;
        };
        let coords = (row as Coord, col as Coord);
        let expected = board
            .iter_neighbors(coords)
            .filter(|&pos| board[pos.to_nd_index()].is_mine())
            .count();
        assert_eq!(usize::from(count), expected, "at {coords:?}");
    }
}

#[test]
fn two_by_two_board_is_won_by_revealing_safe_cells() {
    let difficulty = Difficulty::new(2, 2, 1).unwrap();
    let mut engine =
        Engine::with_generator(difficulty, FixedMineGenerator::new([(0, 1)])).unwrap();

    assert_eq!(engine.reveal((0, 0)), RevealOutcome::Revealed);
    assert_eq!(engine.reveal((1, 0)), RevealOutcome::Revealed);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.reveal((1, 1)), RevealOutcome::Won);

    assert_eq!(engine.status(), GameStatus::Won);
    assert!(!engine.cell_at((0, 1)).unwrap().revealed);
    assert_eq!(safe_cells_revealed(&engine), 3);
}

#[test]
fn flag_blocks_reveal() {
    let mut engine = Engine::new(Preset::Easy.difficulty()).unwrap();

    assert_eq!(engine.toggle_flag((1, 1)), FlagOutcome::Flagged);
    assert_eq!(engine.reveal((1, 1)), RevealOutcome::NoChange);

    assert!(!engine.cell_at((1, 1)).unwrap().revealed);
    assert_eq!(engine.flag_count(), 1);
}

#[test]
fn random_play_keeps_invariants() {
    let difficulty = Preset::Medium.difficulty();
    let (rows, cols) = difficulty.size();

    for seed in 0..20 {
        let mut engine =
            Engine::with_generator(difficulty, RandomMineGenerator::from_seed_u64(seed)).unwrap();

        // sweep the board row by row until the game ends
        'play: for row in 0..rows {
            for col in 0..cols {
                engine.reveal((row, col));
                if engine.is_finished() {
                    break 'play;
                }
            }
        }

        let mine_cells: Vec<_> = engine.board().iter().filter(|cell| cell.is_mine()).collect();
        assert_eq!(mine_cells.len(), usize::from(difficulty.mines));
        match engine.status() {
            GameStatus::Lost => {
                assert!(mine_cells.iter().all(|cell| cell.revealed));
                assert!(engine.triggered_mine().is_some());
            }
            GameStatus::Won => {
                assert!(mine_cells.iter().all(|cell| !cell.revealed));
                assert_eq!(
                    safe_cells_revealed(&engine),
                    usize::from(difficulty.safe_cells())
                );
            }
            status => panic!("game should have ended, got {status:?}"),
        }
        assert!(!engine.timer_running());
    }
}

#[test]
fn difficulty_change_resets_everything() {
    let mut engine = Engine::new(Preset::Easy.difficulty()).unwrap();
    engine.reveal((4, 4));
    engine.tick();

    engine.reset("hard".parse().unwrap()).unwrap();
    let snapshot = Snapshot::from_engine(&engine);

    assert_eq!(snapshot.size, (16, 30));
    assert_eq!(snapshot.mine_count, 99);
    assert_eq!(snapshot.status, GameStatus::Pending);
    assert_eq!(snapshot.elapsed_secs, 0);
    assert!(snapshot.cells.iter().all(|view| *view == CellView::Hidden));
}
