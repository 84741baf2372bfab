//! Bounded brute-force approximation of single-qubit gates by braid words.
//!
//! A qubit is encoded in three anyons, so its braid group is generated by the
//! two exchanges σ1 (strands 0,1) and σ2 (strands 1,2). σ1 is diagonal in the
//! fusion basis of the first pair, `B1 = diag(R_c)` over the pair's fusion
//! channels; σ2 is the same exchange seen through the F-move,
//! `B2 = F · B1 · F⁻¹`.
//!
//! The base set of length `L` holds every reduced word of at most `L`
//! letters whose unitary is new up to global phase, shortest representative
//! first. Base sets are built once per `(anyon, L)` and shared for the
//! lifetime of the process; set `L` is built by extending set `L − 1`, so a
//! longer base set always contains every word of a shorter one.

use std::sync::{Arc, LazyLock, Mutex, OnceLock, PoisonError};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use tqc_ir::{
    AnyonModel, AnyonType, BraidGenerator, BraidWord, Charge, IrResult, QubitId, StandardGate,
};

use crate::error::{CompileError, CompileResult};
use crate::options::{MAX_SEARCH_LENGTH, SearchConfig};
use crate::unitary::Unitary2x2;

/// One letter of the search alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraidLetter {
    /// σ1, clockwise exchange of strands 0 and 1.
    Sigma1,
    /// σ1⁻¹.
    Sigma1Inv,
    /// σ2, clockwise exchange of strands 1 and 2.
    Sigma2,
    /// σ2⁻¹.
    Sigma2Inv,
}

impl BraidLetter {
    /// The full alphabet.
    pub const ALL: [BraidLetter; 4] = [
        BraidLetter::Sigma1,
        BraidLetter::Sigma1Inv,
        BraidLetter::Sigma2,
        BraidLetter::Sigma2Inv,
    ];

    /// The letter that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            BraidLetter::Sigma1 => BraidLetter::Sigma1Inv,
            BraidLetter::Sigma1Inv => BraidLetter::Sigma1,
            BraidLetter::Sigma2 => BraidLetter::Sigma2Inv,
            BraidLetter::Sigma2Inv => BraidLetter::Sigma2,
        }
    }

    /// The generator this letter denotes when the qubit's first strand is `base`.
    pub fn to_generator(self, base: u32) -> BraidGenerator {
        match self {
            BraidLetter::Sigma1 => BraidGenerator::clockwise(base),
            BraidLetter::Sigma1Inv => BraidGenerator::counter_clockwise(base),
            BraidLetter::Sigma2 => BraidGenerator::clockwise(base + 1),
            BraidLetter::Sigma2Inv => BraidGenerator::counter_clockwise(base + 1),
        }
    }

    fn slot(self) -> usize {
        match self {
            BraidLetter::Sigma1 => 0,
            BraidLetter::Sigma1Inv => 1,
            BraidLetter::Sigma2 => 2,
            BraidLetter::Sigma2Inv => 3,
        }
    }
}

/// The four letter matrices of `anyon`, indexed like [`BraidLetter::ALL`].
pub fn letter_matrices(anyon: AnyonType) -> [Unitary2x2; 4] {
    let [c0, c1] = anyon
        .fusion_channels()
        .unwrap_or([Charge::Vacuum, anyon.encoding_charge()]);
    let one = num_complex::Complex64::new(1.0, 0.0);
    let b1 = Unitary2x2::diag(
        anyon.r_matrix(c0).unwrap_or(one),
        anyon.r_matrix(c1).unwrap_or(one),
    );
    let [a, b, c, d] = anyon.f_matrix();
    let f = Unitary2x2::new(a, b, c, d);
    let b2 = f * b1 * f.dagger();
    [b1, b1.dagger(), b2, b2.dagger()]
}

/// A word in the base set.
#[derive(Debug, Clone)]
pub struct BaseWord {
    /// Letters in application order.
    pub letters: Vec<BraidLetter>,
    /// Accumulated unitary.
    pub unitary: Unitary2x2,
}

/// All phase-distinct reduced words up to a maximum length.
#[derive(Debug)]
pub struct BaseSet {
    anyon: AnyonType,
    max_length: usize,
    /// Sorted by word length.
    words: Vec<BaseWord>,
    /// Start of the words of exactly `max_length` letters.
    frontier: usize,
}

impl BaseSet {
    /// The set containing only the empty word.
    fn root(anyon: AnyonType) -> Self {
        Self {
            anyon,
            max_length: 0,
            words: vec![BaseWord {
                letters: Vec::new(),
                unitary: Unitary2x2::identity(),
            }],
            frontier: 0,
        }
    }

    /// Extend every word of maximal length by one letter.
    fn extend(&self) -> Self {
        let matrices = letter_matrices(self.anyon);
        let mut seen: FxHashSet<[i64; 8]> =
            self.words.iter().map(|w| w.unitary.phase_key()).collect();
        let mut words = self.words.clone();
        let frontier = words.len();

        for word in &self.words[self.frontier..] {
            let last = word.letters.last().copied();
            for letter in BraidLetter::ALL {
                if last == Some(letter.inverse()) {
                    continue;
                }
                let unitary = matrices[letter.slot()] * word.unitary;
                if !seen.insert(unitary.phase_key()) {
                    continue;
                }
                let mut letters = Vec::with_capacity(word.letters.len() + 1);
                letters.extend_from_slice(&word.letters);
                letters.push(letter);
                words.push(BaseWord { letters, unitary });
            }
        }

        Self {
            anyon: self.anyon,
            max_length: self.max_length + 1,
            words,
            frontier,
        }
    }

    /// The anyon model the words are evaluated in.
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon
    }

    /// Longest word length admitted.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The words, shortest first.
    pub fn words(&self) -> &[BaseWord] {
        &self.words
    }

    /// Number of distinct unitaries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: the empty word is always present.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

type BaseSetCell = Arc<OnceLock<Arc<BaseSet>>>;

static BASE_SETS: LazyLock<Mutex<FxHashMap<(AnyonType, usize), BaseSetCell>>> =
    LazyLock::new(|| Mutex::new(FxHashMap::default()));

/// The memoized base set of `anyon` up to `max_length` letters.
///
/// # Errors
///
/// [`CompileError::Validation`] if `max_length` exceeds [`MAX_SEARCH_LENGTH`].
pub fn base_set(anyon: AnyonType, max_length: usize) -> CompileResult<Arc<BaseSet>> {
    if max_length > MAX_SEARCH_LENGTH {
        return Err(CompileError::Validation(format!(
            "approximation word length {max_length} exceeds the limit of {MAX_SEARCH_LENGTH}"
        )));
    }
    Ok(cached_base_set(anyon, max_length))
}

fn cached_base_set(anyon: AnyonType, max_length: usize) -> Arc<BaseSet> {
    let cell = {
        let mut map = BASE_SETS.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry((anyon, max_length)).or_default())
    };
    // The map lock is released; building may recurse into shorter lengths.
    Arc::clone(cell.get_or_init(|| {
        let set = if max_length == 0 {
            BaseSet::root(anyon)
        } else {
            cached_base_set(anyon, max_length - 1).extend()
        };
        debug!(
            "Built {} base set of length {}: {} words",
            anyon,
            max_length,
            set.len()
        );
        Arc::new(set)
    }))
}

/// The best word found for a target unitary.
#[derive(Debug, Clone)]
pub struct Approximation {
    /// Letters in application order.
    pub letters: Vec<BraidLetter>,
    /// The word's unitary.
    pub unitary: Unitary2x2,
    /// Distance to the target.
    pub error: f64,
}

impl Approximation {
    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Check if the best word is empty.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Place the word on `qubit`'s strands.
    pub fn to_braid_word(&self, qubit: QubitId, strand_count: u32) -> IrResult<BraidWord> {
        let base = qubit.strand_index();
        BraidWord::new(
            strand_count,
            self.letters.iter().map(|l| l.to_generator(base)).collect(),
        )
    }
}

/// Nearest-unitary search over memoized base sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximationSearch {
    anyon: AnyonType,
}

impl ApproximationSearch {
    /// Create a search for `anyon`.
    pub fn new(anyon: AnyonType) -> Self {
        Self { anyon }
    }

    /// The anyon model searched.
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon
    }

    /// Find the word closest to `target`.
    ///
    /// Base sets of length `seed_length..=max_length` are scanned in order,
    /// stopping at the first length that yields a word within `tolerance`.
    /// Among equally close words the shorter one wins. The best word is
    /// returned even when it misses `tolerance`.
    ///
    /// # Errors
    ///
    /// [`CompileError::Validation`] if `seed_length > max_length` or
    /// `max_length` exceeds [`MAX_SEARCH_LENGTH`].
    pub fn approximate(
        &self,
        target: &Unitary2x2,
        tolerance: f64,
        seed_length: usize,
        max_length: usize,
    ) -> CompileResult<Approximation> {
        if seed_length > max_length {
            return Err(CompileError::Validation(format!(
                "seed length {seed_length} exceeds max length {max_length}"
            )));
        }

        let mut best: Option<(usize, f64)> = None;
        let mut best_set = base_set(self.anyon, seed_length)?;
        let mut scanned = 0;

        for length in seed_length..=max_length {
            let set = base_set(self.anyon, length)?;
            // Earlier sets are prefixes of later ones.
            for (index, word) in set.words().iter().enumerate().skip(scanned) {
                let error = target.distance(&word.unitary);
                if best.is_none_or(|(_, e)| error < e) {
                    best = Some((index, error));
                }
            }
            scanned = set.len();
            best_set = set;

            if best.is_some_and(|(_, e)| e <= tolerance) {
                break;
            }
        }

        let (index, error) = best.ok_or_else(|| {
            CompileError::Validation("approximation base set is empty".to_string())
        })?;
        let word = &best_set.words()[index];
        debug!(
            "Approximated target with {} letters, error {:.3e}",
            word.letters.len(),
            error
        );
        Ok(Approximation {
            letters: word.letters.clone(),
            unitary: word.unitary,
            error,
        })
    }

    /// Find the word closest to a single-qubit gate.
    ///
    /// # Errors
    ///
    /// [`CompileError::Validation`] for multi-qubit gates or bad search bounds.
    pub fn approximate_gate(
        &self,
        gate: &StandardGate,
        tolerance: f64,
        search: SearchConfig,
    ) -> CompileResult<Approximation> {
        let target = Unitary2x2::from_gate(gate).ok_or_else(|| {
            CompileError::Validation(format!("'{gate}' is not a single-qubit gate"))
        })?;
        self.approximate(&target, tolerance, search.seed_length, search.max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_words_are_reduced() {
        for anyon in AnyonType::ALL {
            let set = base_set(anyon, 5).unwrap();
            for word in set.words() {
                assert!(word.letters.len() <= 5);
                for pair in word.letters.windows(2) {
                    assert_ne!(pair[1], pair[0].inverse(), "{anyon}: {:?}", word.letters);
                }
            }
        }
    }

    #[test]
    fn test_words_are_phase_distinct() {
        let set = base_set(AnyonType::Fibonacci, 4).unwrap();
        let keys: FxHashSet<[i64; 8]> = set.words().iter().map(|w| w.unitary.phase_key()).collect();
        assert_eq!(keys.len(), set.len());
        assert!(set.words()[0].letters.is_empty());
    }

    #[test]
    fn test_ising_set_closes_on_clifford_group() {
        // Single-qubit Cliffords modulo phase.
        assert!(base_set(AnyonType::Ising, 10).unwrap().len() <= 24);
    }

    #[test]
    fn test_base_sets_are_nested() {
        let short = base_set(AnyonType::Fibonacci, 3).unwrap();
        let long = base_set(AnyonType::Fibonacci, 5).unwrap();
        assert!(long.len() >= short.len());
        for (a, b) in short.words().iter().zip(long.words()) {
            assert_eq!(a.letters, b.letters);
        }
    }

    #[test]
    fn test_base_sets_are_memoized() {
        let a = base_set(AnyonType::Fibonacci, 4).unwrap();
        let b = base_set(AnyonType::Fibonacci, 4).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_concurrent_readers_share_one_set() {
        let sets: Vec<Arc<BaseSet>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| base_set(AnyonType::Fibonacci, 6).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for set in &sets[1..] {
            assert!(Arc::ptr_eq(&sets[0], set));
        }
        assert_eq!(sets[0].max_length(), 6);
    }

    #[test]
    fn test_length_limit() {
        assert!(matches!(
            base_set(AnyonType::Ising, MAX_SEARCH_LENGTH + 1),
            Err(CompileError::Validation(_))
        ));
        let search = ApproximationSearch::new(AnyonType::Ising);
        assert!(matches!(
            search.approximate(&Unitary2x2::h(), 0.1, 4, 2),
            Err(CompileError::Validation(_))
        ));
    }

    #[test]
    fn test_ising_hadamard_is_exact() {
        let search = ApproximationSearch::new(AnyonType::Ising);
        let approx = search.approximate(&Unitary2x2::h(), 1e-10, 1, 6).unwrap();
        assert_eq!(approx.error, 0.0);
        assert!(approx.len() <= 3);
    }

    #[test]
    fn test_identity_target_is_the_empty_word() {
        let search = ApproximationSearch::new(AnyonType::Fibonacci);
        let approx = search.approximate(&Unitary2x2::identity(), 0.0, 0, 3).unwrap();
        assert!(approx.is_empty());
        assert_eq!(approx.error, 0.0);
    }

    #[test]
    fn test_best_result_returned_beyond_tolerance() {
        let search = ApproximationSearch::new(AnyonType::Fibonacci);
        let approx = search.approximate(&Unitary2x2::h(), 0.0, 1, 2).unwrap();
        assert!(approx.error > 0.0);
        assert!(approx.len() <= 2);
    }

    #[test]
    fn test_longer_search_never_worse() {
        let search = ApproximationSearch::new(AnyonType::Fibonacci);
        let target = Unitary2x2::p(PI / 4.0);
        let mut previous = f64::INFINITY;
        for max_length in 1..=7 {
            let error = search.approximate(&target, 0.0, 1, max_length).unwrap().error;
            assert!(error <= previous + 1e-10, "max_length = {max_length}");
            previous = error;
        }
    }

    #[test]
    fn test_early_stop_at_seed_length() {
        let search = ApproximationSearch::new(AnyonType::Fibonacci);
        let approx = search.approximate(&Unitary2x2::h(), 1.0, 1, 8).unwrap();
        assert!(approx.len() <= 1);
    }

    #[test]
    fn test_to_braid_word_uses_two_strand_pairs() {
        let approx = Approximation {
            letters: vec![BraidLetter::Sigma1, BraidLetter::Sigma2Inv],
            unitary: Unitary2x2::identity(),
            error: 0.0,
        };
        let word = approx.to_braid_word(QubitId(1), 4).unwrap();
        assert_eq!(
            word.generators(),
            &[
                BraidGenerator::clockwise(1),
                BraidGenerator::counter_clockwise(2)
            ]
        );
        assert!(approx.to_braid_word(QubitId(1), 3).is_err());
    }

    #[test]
    fn test_multi_qubit_gate_rejected() {
        let search = ApproximationSearch::new(AnyonType::Ising);
        assert!(matches!(
            search.approximate_gate(&StandardGate::CX, 0.1, SearchConfig::default()),
            Err(CompileError::Validation(_))
        ));
    }
}
