use criterion::{
    criterion_group,
    criterion_main,
    Criterion
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sudoku_engine::{Board, SudokuGrid};
use sudoku_engine::generator::Generator;
use sudoku_engine::solver;

// Explanation of benchmark classes:
//
// count solutions: exhaustive backtracking over all branches. Kept to 4x4
//                  grids, since full enumeration of a sparse 9x9 explodes.
// solve: first-solution backtracking on a standard 9x9 puzzle.
// generate: full solution fill plus random clue removal, seeded for
//           reproducible measurements.

// 24 clues, solvable
const PUZZLE_9X9: &str = "3x3;\
     ,2, , ,6, ,5, ,1,\
    5, ,8, ,1, , , , ,\
     , , ,3, , , ,4, ,\
     ,5, , , ,4, , ,2,\
     , ,9, , , ,3, , ,\
    8, , ,5, , , ,1, ,\
     ,4, , , ,9, , , ,\
     , , , ,8, ,9, ,4,\
    2, ,6, ,4, , ,8, ";

fn benchmark_count_solutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("count solutions");
    let empty = SudokuGrid::new(2, 2).unwrap();
    let puzzle = SudokuGrid::parse("2x2;\
        2, , , ,\
         , ,3, ,\
         , , ,4,\
         ,2, , ").unwrap();

    group.bench_function("empty 4x4",
        |b| b.iter(|| assert_eq!(288, solver::count_solutions(&empty))));
    group.bench_function("4x4 puzzle",
        |b| b.iter(|| assert_eq!(1, solver::count_solutions(&puzzle))));
}

fn benchmark_solve(c: &mut Criterion) {
    let puzzle = SudokuGrid::parse(PUZZLE_9X9).unwrap();

    c.bench_function("solve 9x9",
        |b| b.iter(|| assert!(solver::solve(&puzzle).is_some())));
}

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    group.bench_function("9x9 with 30 clues", |b| b.iter(|| {
        let mut board = Board::new(3, 3).unwrap();
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(42));
        generator.generate(&mut board, 30).unwrap();
        assert_eq!(51, board.count_empty());
    }));
}

criterion_group!(all,
    benchmark_count_solutions,
    benchmark_solve,
    benchmark_generate
);

criterion_main!(all);
