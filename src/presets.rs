// src/presets.rs
//! Form defaults and the suggestion lists offered next to the inputs.

use rand::Rng;

pub const DEFAULT_PERSON: &str = "蔣萬安";
pub const DEFAULT_EVENT: &str = "被批評兩岸立場軟弱";

pub const PERSON_PLACEHOLDER: &str = "例如：柯文哲、馬英九";
pub const EVENT_PLACEHOLDER: &str = "例如：選舉大敗、被質詢";

pub const PRESET_SUBJECTS: &[&str] = &[
    "賴清德", "韓國瑜", "柯文哲", "蕭美琴", "盧秀燕", "蔣萬安", "黃國昌", "徐巧芯", "王世堅", "謝龍介",
];

pub const PRESET_TOPICS: &[&str] = &[
    "2014的黃國昌",
    "2026 縣市長選舉結果",
    "柯文哲京華城案二審",
    "賴清德期中執政總檢討",
    "藍白合 2.0 破局",
    "盧秀燕備戰 2028",
    "立法院修憲爭議",
    "大巨蛋第 101 次漏水",
    "AI 監管法案",
    "重啟核能公投",
];

/// One random figure and one random topic. Only prefills the form.
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let subject = PRESET_SUBJECTS[rng.random_range(0..PRESET_SUBJECTS.len())];
    let topic = PRESET_TOPICS[rng.random_range(0..PRESET_TOPICS.len())];
    (subject, topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_pair_draws_from_presets() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (subject, topic) = random_pair(&mut rng);
            assert!(PRESET_SUBJECTS.contains(&subject));
            assert!(PRESET_TOPICS.contains(&topic));
        }
    }

    #[test]
    fn test_defaults_are_presets() {
        assert!(PRESET_SUBJECTS.contains(&DEFAULT_PERSON));
    }
}
