use sqlx::{Sqlite, Transaction};

use crate::domain::errors::DomainResult;
use crate::infrastructure::repositories::{SqliteDeviceRepository, SqliteMeasureRepository};

/// One transaction's worth of repository work
///
/// Repositories borrowed from a unit of work all run on the same
/// transaction. Nothing becomes visible to other requests until
/// [`UnitOfWork::commit`]; dropping the unit of work without committing
/// rolls everything back, which covers early returns and cancelled requests.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// Device repository bound to this transaction
    pub fn devices(&mut self) -> SqliteDeviceRepository<'_> {
        SqliteDeviceRepository::new(&mut self.tx)
    }

    /// Measure repository bound to this transaction
    pub fn measures(&mut self) -> SqliteMeasureRepository<'_> {
        SqliteMeasureRepository::new(&mut self.tx)
    }

    /// Makes every write in this unit of work durable
    pub async fn commit(self) -> DomainResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Discards every write in this unit of work
    pub async fn rollback(self) -> DomainResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
