//! Dataset statistics
//!
//! Aggregates over the user dataset: distinct cities, companies and e-mail
//! domains, plus per-city and per-company breakdowns. Every list is sorted so
//! the output is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::record::{resolve, Record, Value};

const CITY: &str = "address.city";
const ZIPCODE: &str = "address.zipcode";
const COMPANY: &str = "company.name";
const CATCHPHRASE: &str = "company.catchPhrase";
const STRATEGY: &str = "company.bs";
const EMAIL: &str = "email";

/// Number of entries in each "top" list of the summary
pub const TOP_N: usize = 5;

/// Non-empty text at a path
fn text_at<'a>(record: &'a Record, path: &str) -> Option<&'a str> {
    resolve(record, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn email_domain(record: &Record) -> Option<&str> {
    text_at(record, EMAIL).and_then(|email| email.rsplit('@').next())
}

fn has_value(record: &Record, path: &str) -> bool {
    match resolve(record, path) {
        None | Some(Value::Null) => false,
        Some(Value::Text(s)) => !s.is_empty(),
        Some(Value::Record(r)) => !r.is_empty(),
        Some(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total_users: usize,
    pub unique_cities: usize,
    pub unique_companies: usize,
    pub unique_email_domains: usize,
    pub cities: Vec<String>,
    pub companies: Vec<String>,
    pub email_domains: Vec<String>,
}

impl DatasetStats {
    pub fn compute(records: &[Record]) -> Self {
        let mut cities = BTreeSet::new();
        let mut companies = BTreeSet::new();
        let mut domains = BTreeSet::new();

        for record in records {
            if let Some(city) = text_at(record, CITY) {
                cities.insert(city.to_string());
            }
            if let Some(company) = text_at(record, COMPANY) {
                companies.insert(company.to_string());
            }
            if let Some(domain) = email_domain(record) {
                domains.insert(domain.to_string());
            }
        }

        Self {
            total_users: records.len(),
            unique_cities: cities.len(),
            unique_companies: companies.len(),
            unique_email_domains: domains.len(),
            cities: cities.into_iter().collect(),
            companies: companies.into_iter().collect(),
            email_domains: domains.into_iter().collect(),
        }
    }
}

/// A value and how many records carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    pub users_with_address: usize,
    pub users_with_company: usize,
    pub users_with_email: usize,
    pub users_with_phone: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeographicDistribution {
    pub total_cities: usize,
    pub users_per_city_avg: f64,
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_users: usize,
    pub data_quality: DataQuality,
    pub top_cities: Vec<CountEntry>,
    pub top_companies: Vec<CountEntry>,
    pub top_email_domains: Vec<CountEntry>,
    pub geographic_distribution: GeographicDistribution,
}

impl StatsSummary {
    pub fn compute(records: &[Record]) -> Self {
        let mut cities: BTreeMap<&str, usize> = BTreeMap::new();
        let mut companies: BTreeMap<&str, usize> = BTreeMap::new();
        let mut domains: BTreeMap<&str, usize> = BTreeMap::new();

        for record in records {
            if let Some(city) = text_at(record, CITY) {
                *cities.entry(city).or_default() += 1;
            }
            if let Some(company) = text_at(record, COMPANY) {
                *companies.entry(company).or_default() += 1;
            }
            if let Some(domain) = email_domain(record) {
                *domains.entry(domain).or_default() += 1;
            }
        }

        let count_with = |path: &str| records.iter().filter(|r| has_value(r, path)).count();

        let users_per_city_avg = if cities.is_empty() {
            0.0
        } else {
            records.len() as f64 / cities.len() as f64
        };

        Self {
            total_users: records.len(),
            data_quality: DataQuality {
                users_with_address: count_with("address"),
                users_with_company: count_with("company"),
                users_with_email: count_with(EMAIL),
                users_with_phone: count_with("phone"),
            },
            geographic_distribution: GeographicDistribution {
                total_cities: cities.len(),
                users_per_city_avg,
            },
            top_cities: most_common(&cities, TOP_N),
            top_companies: most_common(&companies, TOP_N),
            top_email_domains: most_common(&domains, TOP_N),
        }
    }
}

/// Highest counts first; ties by name
fn most_common(counts: &BTreeMap<&str, usize>, n: usize) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .iter()
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count: *count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(n);
    entries
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityStats {
    pub user_count: usize,
    pub unique_zipcodes: usize,
    pub unique_companies: usize,
    pub zipcodes: Vec<String>,
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityReport {
    pub cities: BTreeMap<String, CityStats>,
    pub total_cities: usize,
}

impl CityReport {
    pub fn compute(records: &[Record]) -> Self {
        let mut acc: BTreeMap<&str, (usize, BTreeSet<&str>, BTreeSet<&str>)> = BTreeMap::new();

        for record in records {
            let Some(city) = text_at(record, CITY) else {
                continue;
            };
            let entry = acc.entry(city).or_default();
            entry.0 += 1;
            if let Some(zip) = text_at(record, ZIPCODE) {
                entry.1.insert(zip);
            }
            if let Some(company) = text_at(record, COMPANY) {
                entry.2.insert(company);
            }
        }

        let cities: BTreeMap<String, CityStats> = acc
            .into_iter()
            .map(|(city, (count, zips, companies))| {
                let stats = CityStats {
                    user_count: count,
                    unique_zipcodes: zips.len(),
                    unique_companies: companies.len(),
                    zipcodes: zips.into_iter().map(String::from).collect(),
                    companies: companies.into_iter().map(String::from).collect(),
                };
                (city.to_string(), stats)
            })
            .collect();

        Self {
            total_cities: cities.len(),
            cities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    pub employee_count: usize,
    pub cities_present: Vec<String>,
    pub city_count: usize,
    pub catchphrase: String,
    pub business_strategy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyReport {
    pub companies: BTreeMap<String, CompanyStats>,
    pub total_companies: usize,
}

impl CompanyReport {
    pub fn compute(records: &[Record]) -> Self {
        let mut companies: BTreeMap<String, CompanyStats> = BTreeMap::new();

        for record in records {
            let Some(name) = text_at(record, COMPANY) else {
                continue;
            };
            // First record seen for a company supplies its slogan and strategy
            let stats = companies
                .entry(name.to_string())
                .or_insert_with(|| CompanyStats {
                    employee_count: 0,
                    cities_present: Vec::new(),
                    city_count: 0,
                    catchphrase: text_at(record, CATCHPHRASE).unwrap_or_default().to_string(),
                    business_strategy: text_at(record, STRATEGY).unwrap_or_default().to_string(),
                });
            stats.employee_count += 1;
            if let Some(city) = text_at(record, CITY) {
                if let Err(pos) = stats.cities_present.binary_search_by(|c| c.as_str().cmp(city)) {
                    stats.cities_present.insert(pos, city.to_string());
                }
            }
            stats.city_count = stats.cities_present.len();
        }

        Self {
            total_companies: companies.len(),
            companies,
        }
    }
}
