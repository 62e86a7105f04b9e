//! Demo dataset of candidate profiles
//!
//! Profiles are fabricated from fixed pools and kept on disk as CSV with the
//! header `name,email,location,skills,experience_years,summary,raw_text`.

use crate::error::{Result, ScoutError};
use crate::types::Profile;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const NAMES: [&str; 50] = [
    "Aiman Saba", "Pooja Sharma", "Rahul Verma", "Sneha Rao", "Vikram Singh",
    "Neha Gupta", "Arjun Rao", "Priya Nair", "Rohit Das", "Kavya Menon",
    "Dev Patel", "Sanya Mehta", "Akash Reddy", "Riya Kapoor", "Vivek Joshi",
    "Meera Iyer", "Aditya Jain", "Ishita Shah", "Manish R", "Ananya Bhat",
    "Shreya Kumar", "Ravi Raj", "Tarun S", "Deepika N", "Varun V",
    "Harini K", "Gaurav S", "Simran A", "Kiran T", "Dhruv P",
    "Tanya L", "Sahil Q", "Ritika D", "Mohan J", "Lakshmi V",
    "Snehal P", "Ankit R", "Bhavya S", "Rachit P", "Diya K",
    "Suraj T", "Keerthi N", "Anjali F", "Arav S", "Meghana B",
    "Charan C", "Irfan H", "Lavanya R", "Rajesh Y", "Suma M",
];

pub const LOCATIONS: [&str; 7] = [
    "Bangalore", "Mysore", "Hyderabad", "Chennai", "Pune", "Delhi", "Mumbai",
];

pub const SKILL_SETS: [&str; 10] = [
    "Python, Machine Learning, Data Analysis",
    "Java, React, Full Stack Development",
    "SQL, Tableau, Data Visualization",
    "Deep Learning, NLP, AI Research",
    "Excel, Business Intelligence, Power BI",
    "C++, Java, Backend Development",
    "HTML, CSS, JavaScript, UI/UX Design",
    "Data Engineering, Cloud, AWS",
    "Cybersecurity, Networking, Linux",
    "Finance, Data Analytics, Excel",
];

pub const SUMMARIES: [&str; 5] = [
    "Enthusiastic developer with hands-on experience in modern tools.",
    "Dedicated analyst passionate about insights and data-driven strategy.",
    "Team player with strong background in coding and research.",
    "Innovator who loves solving real-world technical problems.",
    "Self-motivated learner interested in emerging technologies.",
];

/// Dataset generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub size: usize,
    /// Fixed seed for reproducible output; random when `None`
    pub seed: Option<u64>,
    pub min_experience: u32,
    pub max_experience: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            size: NAMES.len(),
            seed: None,
            min_experience: 1,
            max_experience: 8,
        }
    }
}

impl DatasetConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_experience > self.max_experience {
            return Err(ScoutError::Configuration(format!(
                "min_experience {} exceeds max_experience {}",
                self.min_experience, self.max_experience
            )));
        }
        Ok(())
    }
}

/// Fabricate `config.size` profiles
pub fn generate_profiles(config: &DatasetConfig) -> Result<Vec<Profile>> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pick = |rng: &mut StdRng, pool: &[&'static str]| -> &'static str {
        pool.choose(rng).copied().unwrap_or_default()
    };

    let profiles = (0..config.size)
        .map(|i| {
            // Past the name pool, reuse names with a round suffix
            let base = NAMES[i % NAMES.len()];
            let name = match i / NAMES.len() {
                0 => base.to_string(),
                round => format!("{} {}", base, round + 1),
            };
            let location = pick(&mut rng, &LOCATIONS);
            let skills = pick(&mut rng, &SKILL_SETS);
            let experience = rng.gen_range(config.min_experience..=config.max_experience);
            let summary = pick(&mut rng, &SUMMARIES);

            Profile::new(
                name,
                format!("user{}@example.com", i + 1),
                location,
                skills,
                experience,
                summary,
            )
        })
        .collect();

    Ok(profiles)
}

/// Write profiles as CSV
pub fn save_csv(path: impl AsRef<Path>, profiles: &[Profile]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for profile in profiles {
        writer.serialize(profile)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), count = profiles.len(), "wrote profile dataset");
    Ok(())
}

/// Read profiles from CSV.
///
/// A blank `raw_text` column is re-derived from name, skills and summary.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Profile>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut profiles = Vec::new();
    for (row, record) in reader.deserialize::<Profile>().enumerate() {
        let profile = record.map_err(|e| {
            ScoutError::Dataset(format!("{}: row {}: {}", path.display(), row + 1, e))
        })?;
        let profile = if profile.raw_text.trim().is_empty() {
            Profile::new(
                profile.name,
                profile.email,
                profile.location,
                profile.skills,
                profile.experience_years,
                profile.summary,
            )
        } else {
            profile
        };
        profiles.push(profile);
    }

    tracing::debug!(path = %path.display(), count = profiles.len(), "loaded profile dataset");
    Ok(profiles)
}

/// Load the dataset at `path`, generating and saving one if it is absent
pub fn load_or_generate(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<Vec<Profile>> {
    let path = path.as_ref();
    if path.exists() {
        return load_csv(path);
    }

    let profiles = generate_profiles(config)?;
    save_csv(path, &profiles)?;
    tracing::info!(path = %path.display(), count = profiles.len(), "generated demo dataset");
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let cfg = DatasetConfig::default().with_seed(7);
        let a = generate_profiles(&cfg).unwrap();
        let b = generate_profiles(&cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert_eq!(a[0].name, "Aiman Saba");
        assert_eq!(a[49].email, "user50@example.com");
    }

    #[test]
    fn generated_fields_come_from_pools() {
        let profiles = generate_profiles(&DatasetConfig::default().with_seed(1)).unwrap();
        for p in &profiles {
            assert!(LOCATIONS.contains(&p.location.as_str()));
            assert!(SKILL_SETS.contains(&p.skills.as_str()));
            assert!(SUMMARIES.contains(&p.summary.as_str()));
            assert!((1..=8).contains(&p.experience_years));
            assert_eq!(p.raw_text, format!("{} {} {}", p.name, p.skills, p.summary));
        }
    }

    #[test]
    fn oversized_dataset_suffixes_names() {
        let profiles =
            generate_profiles(&DatasetConfig::default().with_seed(3).with_size(55)).unwrap();
        assert_eq!(profiles[50].name, "Aiman Saba 2");
        assert_eq!(profiles[54].email, "user55@example.com");
    }

    #[test]
    fn invalid_experience_range() {
        let cfg = DatasetConfig {
            min_experience: 9,
            max_experience: 2,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            generate_profiles(&cfg),
            Err(ScoutError::Configuration(_))
        ));
    }

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        let profiles = generate_profiles(&DatasetConfig::default().with_seed(11)).unwrap();

        save_csv(&path, &profiles).unwrap();
        let header = std::fs::read_to_string(&path).unwrap();
        assert!(header.starts_with(
            "name,email,location,skills,experience_years,summary,raw_text"
        ));
        assert_eq!(load_csv(&path).unwrap(), profiles);
    }

    #[test]
    fn load_rederives_blank_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        std::fs::write(
            &path,
            "name,email,location,skills,experience_years,summary,raw_text\n\
             Dev Patel,user1@example.com,Pune,\"SQL, Tableau\",4,Analyst.,\n",
        )
        .unwrap();
        let loaded = load_csv(&path).unwrap();
        assert_eq!(loaded[0].raw_text, "Dev Patel SQL, Tableau Analyst.");
    }

    #[test]
    fn bad_row_reports_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        std::fs::write(
            &path,
            "name,email,location,skills,experience_years,summary,raw_text\n\
             Dev Patel,user1@example.com,Pune,SQL,many,Analyst.,x\n",
        )
        .unwrap();
        assert!(matches!(load_csv(&path), Err(ScoutError::Dataset(_))));
    }

    #[test]
    fn load_or_generate_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profiles.csv");
        let cfg = DatasetConfig::default().with_seed(5);

        let first = load_or_generate(&path, &cfg).unwrap();
        assert!(path.exists());
        let second = load_or_generate(&path, &DatasetConfig::default().with_seed(6)).unwrap();
        assert_eq!(first, second);
    }
}
