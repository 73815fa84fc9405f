use crate::error::{AppError, Result};
use crate::github::{RepoSort, RepositorySearch, SortOrder, ORG_BROWSE_PAGE};
use crate::types::RepositoryRecord;

/// Licenses that don't count as open for the featured pick.
const EXCLUDED_LICENSES: &[&str] = &["cc0-1.0"];

/// Source of uniformly distributed indices in `0..len`.
pub trait IndexSource {
    fn pick(&mut self, len: usize) -> usize;
}

pub struct OsRandom;

impl IndexSource for OsRandom {
    fn pick(&mut self, len: usize) -> usize {
        let mut bytes = [0u8; 8];
        if getrandom::getrandom(&mut bytes).is_err() {
            log::warn!("OS randomness unavailable, picking the first entry");
            return 0;
        }
        (u64::from_le_bytes(bytes) % len as u64) as usize
    }
}

/// Picks a random well-starred repository from a random organization,
/// preferring open licenses.
pub async fn pick_featured(
    search: &dyn RepositorySearch,
    rng: &mut dyn IndexSource,
) -> Result<RepositoryRecord> {
    let open_licenses: Vec<String> = search
        .list_licenses()
        .await?
        .into_iter()
        .map(|license| license.key)
        .filter(|key| !EXCLUDED_LICENSES.contains(&key.as_str()))
        .collect();

    let orgs = search.search_users("type:org", ORG_BROWSE_PAGE).await?;
    if orgs.is_empty() {
        return Err(AppError::Featured("No organizations found.".to_string()));
    }
    let org = &orgs[rng.pick(orgs.len())];
    log::debug!("Featured organization: {}", org.login);

    let candidates = search
        .search_repositories(
            &format!("org:{} stars:>100 forks:>20", org.login),
            RepoSort::Stars,
            SortOrder::Desc,
        )
        .await?;

    let mut pool: Vec<RepositoryRecord> = candidates
        .iter()
        .filter(|repo| {
            repo.license
                .as_ref()
                .is_some_and(|license| open_licenses.contains(&license.key))
        })
        .cloned()
        .collect();
    if pool.is_empty() {
        pool = candidates;
    }
    if pool.is_empty() {
        return Err(AppError::Featured(
            "No repositories found for the selected org.".to_string(),
        ));
    }

    let index = rng.pick(pool.len());
    Ok(pool.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{repo, user, FakeSearch};
    use crate::types::RepositoryLicense;

    struct Fixed(Vec<usize>);

    impl IndexSource for Fixed {
        fn pick(&mut self, len: usize) -> usize {
            let next = self.0.remove(0);
            assert!(next < len);
            next
        }
    }

    fn licensed(id: u64, key: &str) -> RepositoryRecord {
        let mut record = repo(id, "org", &format!("r{}", id));
        record.license = Some(RepositoryLicense {
            key: key.to_string(),
            name: key.to_uppercase(),
        });
        record
    }

    #[tokio::test]
    async fn prefers_open_licensed_repositories() {
        let search = FakeSearch::default()
            .with_licenses(&["mit", "cc0-1.0", "apache-2.0"])
            .with_users("type:org", vec![user("first"), user("org")])
            .with_repositories(
                "org:org stars:>100 forks:>20",
                vec![licensed(1, "cc0-1.0"), repo(2, "org", "unlicensed"), licensed(3, "apache-2.0")],
            );

        let picked = pick_featured(&search, &mut Fixed(vec![1, 0])).await.unwrap();
        assert_eq!(picked.id, 3);
    }

    #[tokio::test]
    async fn falls_back_to_unfiltered_list() {
        let search = FakeSearch::default()
            .with_licenses(&["mit"])
            .with_users("type:org", vec![user("org")])
            .with_repositories(
                "org:org stars:>100 forks:>20",
                vec![licensed(1, "cc0-1.0"), repo(2, "org", "unlicensed")],
            );

        let picked = pick_featured(&search, &mut Fixed(vec![0, 1])).await.unwrap();
        assert_eq!(picked.id, 2);
    }

    #[tokio::test]
    async fn empty_organization_is_an_error() {
        let search = FakeSearch::default()
            .with_licenses(&["mit"])
            .with_users("type:org", vec![user("ghost")]);

        let err = pick_featured(&search, &mut Fixed(vec![0])).await.unwrap_err();
        assert!(matches!(err, AppError::Featured(_)));
        assert_eq!(err.to_string(), "No repositories found for the selected org.");
    }

    #[tokio::test]
    async fn no_organizations() {
        let search = FakeSearch::default();
        let err = pick_featured(&search, &mut Fixed(vec![])).await.unwrap_err();
        assert_eq!(err.to_string(), "No organizations found.");
    }

    #[test]
    fn os_random_stays_in_range() {
        let mut rng = OsRandom;
        for len in [1, 2, 7, 100] {
            assert!(rng.pick(len) < len);
        }
    }
}
