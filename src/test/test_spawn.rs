mod test {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::core::*;
    use crate::test::test_util::EngineTestState;

    #[test]
    fn spawn_fills_only_empty_cells() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let game = EngineTestState::new(r#"
8 . 2 .
. 16 . .
4 . . 32
. . 64 .
"#);
            let before = game.engine.values();
            let mut engine = game.engine;
            assert!(engine.spawn(3, &mut rng));

            let after = engine.values();
            let mut added = 0;
            for (row_before, row_after) in before.iter().zip(after.iter()) {
                for (&b, &a) in row_before.iter().zip(row_after.iter()) {
                    if b != 0 {
                        assert_eq!(a, b, "occupied cell was overwritten");
                    } else if a != 0 {
                        assert!(a == 2 || a == 4);
                        added += 1;
                    }
                }
            }
            assert_eq!(added, 3);
        }
    }

    #[test]
    fn spawn_without_room_changes_nothing() {
        let mut game = EngineTestState::new(r#"
2 4
. 8
"#);
        let before = game.engine.values();
        assert!(!game.engine.spawn(2, &mut game.rng));
        assert_eq!(game.engine.values(), before);

        assert!(game.engine.spawn(1, &mut game.rng));
        assert!(!game.engine.spawn(1, &mut game.rng));
    }

    #[test]
    fn spawning_nothing_always_succeeds() {
        let mut game = EngineTestState::new("2 4");
        assert!(game.engine.spawn(0, &mut game.rng));
        game.assert_matches("2 4");
    }

    #[test]
    fn spawned_tiles_start_fresh() {
        let mut game = EngineTestState::new(". .");
        assert!(game.engine.spawn(2, &mut game.rng));
        assert!(game.engine.iter_tiles().all(|t| t.is_fresh_spawn()));
    }

    #[test]
    fn mostly_twos_with_some_fours() {
        let mut rng = StdRng::seed_from_u64(2048);
        let mut fours = 0;
        for _ in 0..2000 {
            let mut engine = GameEngine::new(1, 1, MergeRule::default()).unwrap();
            assert!(engine.spawn(1, &mut rng));
            if engine.highest_tile() == 4 {
                fours += 1;
            }
        }
        assert!((100..300).contains(&fours), "fours: {}", fours);
    }

    #[test]
    fn every_empty_cell_can_be_chosen() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut hits = [0usize; 4];
        for _ in 0..4000 {
            let mut engine = GameEngine::new(2, 2, MergeRule::default()).unwrap();
            engine.spawn(1, &mut rng);
            let index = engine
                .iter_tiles()
                .position(|t| !t.is_empty())
                .unwrap();
            hits[index] += 1;
        }
        assert!(hits.iter().all(|&h| h > 800), "hits: {:?}", hits);
    }

    #[test]
    fn same_seed_spawns_same_tiles() {
        let mut a = GameEngine::new(4, 4, MergeRule::default()).unwrap();
        let mut b = a.clone();
        a.spawn(5, &mut StdRng::seed_from_u64(99));
        b.spawn(5, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.values(), b.values());
    }
}
