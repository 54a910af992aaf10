// Lexicon-based sentiment scoring.
//
// A document's score is the sum of the valences of its known tokens, using
// the same tokenization as the vectorizer. Ships with a curated AFINN-style
// word list; a custom lexicon can be loaded from a tab-separated file.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::cluster::vectorizer::tokenize;
use crate::sentiment::traits::SentimentScorer;

/// Built-in valences on the AFINN scale (-5 to +5), leaning on terms that
/// show up in crawled web prose and product copy.
const BUILTIN_VALENCES: &[(&str, i8)] = &[
    ("abandon", -2),
    ("abuse", -3),
    ("afraid", -2),
    ("aggressive", -2),
    ("alarming", -2),
    ("amazing", 4),
    ("angry", -3),
    ("annoying", -2),
    ("anxious", -2),
    ("ashamed", -2),
    ("awesome", 4),
    ("awful", -3),
    ("awkward", -2),
    ("bad", -3),
    ("beautiful", 3),
    ("best", 3),
    ("betray", -3),
    ("better", 2),
    ("bitter", -2),
    ("blame", -2),
    ("boring", -3),
    ("breathtaking", 5),
    ("brilliant", 4),
    ("broken", -2),
    ("buggy", -2),
    ("calm", 2),
    ("careless", -2),
    ("celebrate", 3),
    ("chaos", -2),
    ("charming", 3),
    ("cheerful", 2),
    ("clean", 2),
    ("clever", 2),
    ("comfortable", 2),
    ("complain", -2),
    ("confident", 2),
    ("confusing", -2),
    ("cool", 1),
    ("corrupt", -3),
    ("crash", -2),
    ("creative", 2),
    ("cruel", -3),
    ("damage", -3),
    ("dangerous", -2),
    ("dead", -3),
    ("defeated", -2),
    ("delight", 3),
    ("delightful", 3),
    ("depressing", -2),
    ("desperate", -3),
    ("destroy", -3),
    ("dirty", -2),
    ("disappointing", -2),
    ("disaster", -2),
    ("disgusting", -3),
    ("dishonest", -2),
    ("dislike", -2),
    ("doubt", -1),
    ("dreadful", -3),
    ("dull", -2),
    ("eager", 2),
    ("easy", 1),
    ("effective", 2),
    ("elegant", 2),
    ("embarrassing", -2),
    ("empty", -1),
    ("encouraging", 2),
    ("enjoy", 2),
    ("enthusiastic", 3),
    ("error", -2),
    ("evil", -3),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fabulous", 4),
    ("fail", -2),
    ("failure", -2),
    ("fair", 2),
    ("fake", -3),
    ("fantastic", 4),
    ("fascinating", 3),
    ("fault", -2),
    ("favorite", 2),
    ("fear", -2),
    ("fine", 2),
    ("flawed", -2),
    ("fraud", -4),
    ("fresh", 1),
    ("friendly", 2),
    ("frightening", -3),
    ("frustrating", -2),
    ("fun", 4),
    ("funny", 4),
    ("generous", 2),
    ("glad", 3),
    ("gloomy", -2),
    ("good", 3),
    ("gorgeous", 3),
    ("grateful", 3),
    ("great", 3),
    ("greatest", 3),
    ("grim", -2),
    ("happy", 3),
    ("harmful", -2),
    ("hate", -3),
    ("helpful", 2),
    ("helpless", -2),
    ("honest", 2),
    ("hope", 2),
    ("hopeful", 2),
    ("hopeless", -2),
    ("horrible", -3),
    ("horrific", -3),
    ("hurt", -2),
    ("ignore", -1),
    ("impressive", 3),
    ("inferior", -2),
    ("innovative", 2),
    ("inspiring", 2),
    ("interesting", 2),
    ("jealous", -2),
    ("joy", 3),
    ("lazy", -1),
    ("like", 2),
    ("limited", -1),
    ("lonely", -2),
    ("lose", -3),
    ("loser", -3),
    ("loss", -3),
    ("lost", -3),
    ("love", 3),
    ("lovely", 3),
    ("loyal", 3),
    ("lucky", 3),
    ("mad", -3),
    ("masterpiece", 4),
    ("mess", -2),
    ("miserable", -3),
    ("mistake", -2),
    ("nasty", -3),
    ("nice", 3),
    ("noisy", -1),
    ("optimistic", 2),
    ("outstanding", 5),
    ("painful", -2),
    ("panic", -3),
    ("peaceful", 2),
    ("perfect", 3),
    ("pleasant", 3),
    ("pleased", 3),
    ("pleasure", 3),
    ("poor", -2),
    ("popular", 3),
    ("positive", 2),
    ("powerful", 2),
    ("problem", -2),
    ("promising", 2),
    ("proud", 2),
    ("reject", -1),
    ("reliable", 2),
    ("remarkable", 2),
    ("rich", 2),
    ("risky", -2),
    ("rotten", -3),
    ("rude", -2),
    ("sad", -2),
    ("safe", 1),
    ("satisfied", 2),
    ("scam", -2),
    ("scared", -2),
    ("secure", 2),
    ("severe", -2),
    ("shame", -2),
    ("sick", -2),
    ("slow", -1),
    ("smart", 1),
    ("smile", 2),
    ("solid", 2),
    ("sorry", -1),
    ("splendid", 3),
    ("stable", 2),
    ("strange", -1),
    ("strong", 2),
    ("struggle", -2),
    ("stunning", 4),
    ("stupid", -2),
    ("succeed", 3),
    ("success", 2),
    ("successful", 3),
    ("suffer", -2),
    ("super", 3),
    ("superb", 5),
    ("support", 2),
    ("sweet", 2),
    ("terrible", -3),
    ("terrific", 4),
    ("threat", -2),
    ("thrilled", 5),
    ("tired", -2),
    ("toxic", -3),
    ("tragedy", -2),
    ("trouble", -2),
    ("trust", 1),
    ("ugly", -3),
    ("unhappy", -2),
    ("unreliable", -2),
    ("unstable", -2),
    ("upset", -2),
    ("useful", 2),
    ("useless", -2),
    ("valuable", 2),
    ("vibrant", 3),
    ("violent", -3),
    ("warm", 1),
    ("waste", -1),
    ("weak", -2),
    ("welcome", 2),
    ("win", 4),
    ("winner", 4),
    ("wonderful", 4),
    ("worry", -3),
    ("worse", -3),
    ("worst", -3),
    ("worthless", -2),
    ("worthy", 2),
    ("wow", 4),
    ("wrong", -2),
];

/// Word-valence scorer.
#[derive(Debug)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconScorer {
    /// Scorer over the built-in word list.
    pub fn builtin() -> Self {
        let valences = BUILTIN_VALENCES
            .iter()
            .map(|&(word, valence)| (word.to_string(), f64::from(valence)))
            .collect();
        Self { valences }
    }

    /// Load a lexicon from a `word<TAB>valence` file.
    ///
    /// Blank lines and lines starting with `#` are skipped. Entries are
    /// matched per token, so multi-word keys never fire.
    pub fn from_tsv(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;

        let mut valences = HashMap::new();
        for (line_number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, value)) = line.split_once('\t') else {
                bail!(
                    "Lexicon line {} is not word<TAB>valence: {line:?}",
                    line_number + 1
                );
            };
            let valence: f64 = value.trim().parse().with_context(|| {
                format!(
                    "Lexicon line {} has a non-numeric valence: {:?}",
                    line_number + 1,
                    value.trim()
                )
            })?;
            valences.insert(word.trim().to_lowercase(), valence);
        }
        if valences.is_empty() {
            bail!("Lexicon file {} contains no entries", path.display());
        }

        info!(
            path = path.display().to_string(),
            entries = valences.len(),
            "Loaded sentiment lexicon"
        );
        Ok(Self { valences })
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        tokenize(text)
            .iter()
            .filter_map(|token| self.valences.get(token.as_str()))
            .sum()
    }
}
