use uuid::Uuid;

use campus_domain::role::AccountRole;

use crate::domain::repository::AccountRepository;
use crate::domain::types::Account;
use crate::error::MarketError;

pub struct GetAccountUseCase<A> {
    pub accounts: A,
}

impl<A> GetAccountUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<Account, MarketError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(MarketError::NotFound)
    }
}

pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub career_id: Option<Uuid>,
}

pub struct UpdateAccountUseCase<A> {
    pub accounts: A,
}

impl<A> UpdateAccountUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, id: Uuid, input: UpdateAccountInput) -> Result<(), MarketError> {
        if input.name.is_none() && input.career_id.is_none() {
            return Err(MarketError::MissingData);
        }
        if self.accounts.find_by_id(id).await?.is_none() {
            return Err(MarketError::NotFound);
        }
        self.accounts
            .update_profile(id, input.name.as_deref(), input.career_id)
            .await
    }
}

/// Flips an account inactive. Admin accounts are never deactivated this way.
pub struct DeactivateAccountUseCase<A> {
    pub accounts: A,
}

impl<A> DeactivateAccountUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, target_id: Uuid) -> Result<(), MarketError> {
        let Some(target) = self.accounts.find_by_id(target_id).await? else {
            return Err(MarketError::NotFound);
        };
        if target.role == AccountRole::Admin {
            return Err(MarketError::PermissionDenied);
        }
        self.accounts.set_active(target_id, false).await
    }
}
