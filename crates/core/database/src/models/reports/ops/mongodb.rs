use bson::{to_bson, Document};
use haven_models::v0::Comment;
use haven_result::Result;
use iso8601_timestamp::Timestamp;
use mongodb::options::FindOptions;

use crate::MongoDb;
use crate::Report;

use super::AbstractReports;

static COL: &str = "reports";

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        query!(self, insert_one, COL, &report).map(|_| ())
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        query!(self, find_one_by_id, COL, id)?.ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports, newest first
    ///
    /// Ids are ULIDs, so the secondary `_id` sort keeps reports sharing a
    /// creation timestamp in reverse insertion order.
    async fn fetch_reports(&self) -> Result<Vec<Report>> {
        self.find_with_options(
            COL,
            doc! {},
            FindOptions::builder()
                .sort(doc! {
                    "created_at": -1_i32,
                    "_id": -1_i32
                })
                .build(),
        )
        .await
        .map_err(|_| create_database_error!("find", COL))
    }

    /// Atomically increment a report's like counter by one
    async fn like_report(&self, id: &str) -> Result<()> {
        let result = self
            .col::<Document>(COL)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$inc": {
                        "likes": 1_i32
                    },
                    "$set": {
                        "updated_at": to_bson(&Timestamp::now_utc())
                            .map_err(|_| create_database_error!("to_bson", COL))?
                    }
                },
            )
            .await
            .map_err(|_| create_database_error!("update_one", COL))?;

        if result.matched_count == 0 {
            Err(create_error!(NotFound))
        } else {
            Ok(())
        }
    }

    /// Atomically append a comment to a report
    async fn comment_report(&self, id: &str, comment: &Comment) -> Result<Report> {
        let result = self
            .col::<Document>(COL)
            .update_one(
                doc! {
                    "_id": id
                },
                doc! {
                    "$push": {
                        "comments": to_bson(comment)
                            .map_err(|_| create_database_error!("to_bson", COL))?
                    },
                    "$set": {
                        "updated_at": to_bson(&comment.created_at)
                            .map_err(|_| create_database_error!("to_bson", COL))?
                    }
                },
            )
            .await
            .map_err(|_| create_database_error!("update_one", COL))?;

        if result.matched_count == 0 {
            return Err(create_error!(NotFound));
        }

        self.fetch_report(id).await
    }
}
