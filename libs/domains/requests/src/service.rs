use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateRequest, ItemRequest, Page, RequestWithAnswers};
use crate::ports::{ItemAnswerGateway, UserGateway};
use crate::repository::RequestRepository;

/// Service layer for ItemRequest business logic
#[derive(Clone)]
pub struct RequestService<R: RequestRepository, U: UserGateway, I: ItemAnswerGateway> {
    repository: Arc<R>,
    users: Arc<U>,
    items: Arc<I>,
}

impl<R: RequestRepository, U: UserGateway, I: ItemAnswerGateway> RequestService<R, U, I> {
    pub fn new(repository: R, users: U, items: I) -> Self {
        Self {
            repository: Arc::new(repository),
            users: Arc::new(users),
            items: Arc::new(items),
        }
    }

    pub async fn create_request(
        &self,
        requestor_id: Uuid,
        input: CreateRequest,
    ) -> RequestResult<ItemRequest> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        self.ensure_user(requestor_id).await?;

        self.repository
            .create(input, requestor_id, Utc::now())
            .await
    }

    /// The requestor's own requests, newest first, each with its answers
    pub async fn my_requests(&self, requestor_id: Uuid) -> RequestResult<Vec<RequestWithAnswers>> {
        self.ensure_user(requestor_id).await?;

        let requests = self.repository.list_by_requestor(requestor_id).await?;
        self.with_answers(requests).await
    }

    /// Everyone else's requests, newest first, optionally paginated
    pub async fn other_requests(
        &self,
        user_id: Uuid,
        page: Option<Page>,
    ) -> RequestResult<Vec<RequestWithAnswers>> {
        self.ensure_user(user_id).await?;

        if let Some(page) = page {
            if page.size == 0 {
                return Err(RequestError::Validation(
                    "size must be greater than zero".to_string(),
                ));
            }
        }

        let requests = self.repository.list_others(user_id, page).await?;
        self.with_answers(requests).await
    }

    /// One request with its answers; any existing user may look
    pub async fn find_request(
        &self,
        request_id: Uuid,
        user_id: Uuid,
    ) -> RequestResult<RequestWithAnswers> {
        self.ensure_user(user_id).await?;

        let request = self
            .repository
            .get_by_id(request_id)
            .await?
            .ok_or(RequestError::RequestNotFound(request_id))?;

        let items = self.items.answers_for(request.id).await?;
        Ok(RequestWithAnswers::new(request, items))
    }

    async fn ensure_user(&self, user_id: Uuid) -> RequestResult<()> {
        if !self.users.user_exists(user_id).await? {
            return Err(RequestError::UserNotFound(user_id));
        }
        Ok(())
    }

    async fn with_answers(
        &self,
        requests: Vec<ItemRequest>,
    ) -> RequestResult<Vec<RequestWithAnswers>> {
        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            let items = self.items.answers_for(request.id).await?;
            result.push(RequestWithAnswers::new(request, items));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemAnswer;
    use crate::ports::{MockItemAnswerGateway, MockUserGateway};
    use crate::repository::MockRequestRepository;

    fn known_users() -> MockUserGateway {
        let mut users = MockUserGateway::new();
        users.expect_user_exists().returning(|_| Ok(true));
        users
    }

    fn sample_request(requestor_id: Uuid) -> ItemRequest {
        ItemRequest {
            id: Uuid::now_v7(),
            description: "need a drill".to_string(),
            requestor_id,
            created: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_not_found() {
        let mut users = MockUserGateway::new();
        users.expect_user_exists().returning(|_| Ok(false));

        let svc = RequestService::new(
            MockRequestRepository::new(),
            users,
            MockItemAnswerGateway::new(),
        );
        let result = svc
            .create_request(
                Uuid::now_v7(),
                CreateRequest {
                    description: "need a drill".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn empty_description_fails_validation_first() {
        // No expectations: neither gateway nor repository may be called
        let svc = RequestService::new(
            MockRequestRepository::new(),
            MockUserGateway::new(),
            MockItemAnswerGateway::new(),
        );
        let result = svc
            .create_request(
                Uuid::now_v7(),
                CreateRequest {
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn my_requests_carry_their_answers() {
        let asker = Uuid::now_v7();
        let request = sample_request(asker);

        let mut repo = MockRequestRepository::new();
        let returned = request.clone();
        repo.expect_list_by_requestor()
            .returning(move |_| Ok(vec![returned.clone()]));

        let answer = ItemAnswer {
            id: Uuid::now_v7(),
            name: "Drill".to_string(),
            owner_id: Uuid::now_v7(),
            available: true,
        };
        let mut items = MockItemAnswerGateway::new();
        let returned_answer = answer.clone();
        items
            .expect_answers_for()
            .returning(move |_| Ok(vec![returned_answer.clone()]));

        let svc = RequestService::new(repo, known_users(), items);
        let mine = svc.my_requests(asker).await.unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].items, vec![answer]);
    }

    #[tokio::test]
    async fn missing_request_is_not_found() {
        let mut repo = MockRequestRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let svc = RequestService::new(repo, known_users(), MockItemAnswerGateway::new());
        let result = svc.find_request(Uuid::now_v7(), Uuid::now_v7()).await;

        assert!(matches!(result, Err(RequestError::RequestNotFound(_))));
    }

    #[tokio::test]
    async fn zero_page_size_is_a_validation_error() {
        let svc = RequestService::new(
            MockRequestRepository::new(),
            known_users(),
            MockItemAnswerGateway::new(),
        );
        let result = svc
            .other_requests(Uuid::now_v7(), Some(Page { from: 0, size: 0 }))
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }
}
