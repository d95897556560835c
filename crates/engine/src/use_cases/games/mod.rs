//! Generated project listing.

use std::sync::Arc;

use crate::infrastructure::ports::{GenerationError, ProjectGenerator};

pub struct ListGames {
    generator: Arc<dyn ProjectGenerator>,
}

impl ListGames {
    pub fn new(generator: Arc<dyn ProjectGenerator>) -> Self {
        Self { generator }
    }

    pub async fn execute(&self) -> Result<Vec<String>, GenerationError> {
        self.generator.list_projects().await
    }
}

/// Container for project use cases.
pub struct GameUseCases {
    pub list: Arc<ListGames>,
}

impl GameUseCases {
    pub fn new(list: Arc<ListGames>) -> Self {
        Self { list }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockProjectGenerator;

    #[tokio::test]
    async fn delegates_to_generator() {
        let mut generator = MockProjectGenerator::new();
        generator
            .expect_list_projects()
            .times(1)
            .returning(|| Ok(vec!["Dragon_Quest".to_string()]));

        let games = ListGames::new(Arc::new(generator)).execute().await.unwrap();
        assert_eq!(games, vec!["Dragon_Quest".to_string()]);
    }
}
