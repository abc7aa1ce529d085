use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Keys::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Keys::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Keys::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Keys::PublicKey).text().not_null())
                    .col(ColumnDef::new(Keys::PrivateKey).text().not_null())
                    .col(ColumnDef::new(Keys::RefreshToken).text().not_null())
                    .col(
                        ColumnDef::new(Keys::RefreshTokensUsed)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Keys::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Keys::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Keys::Table, Keys::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The refresh flow looks records up by current token.
        manager
            .create_index(
                Index::create()
                    .table(Keys::Table)
                    .col(Keys::RefreshToken)
                    .name("idx_keys_refresh_token")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Keys::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Keys {
    Table,
    Id,
    UserId,
    PublicKey,
    PrivateKey,
    RefreshToken,
    RefreshTokensUsed,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
