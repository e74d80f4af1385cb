// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Scheduled posts are written by the web application; ids come from there
        manager
            .create_table(
                Table::create()
                    .table(ScheduledPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledPosts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledPosts::TeamId).uuid())
                    .col(ColumnDef::new(ScheduledPosts::UserId).uuid())
                    .col(ColumnDef::new(ScheduledPosts::Content).text().not_null())
                    .col(ColumnDef::new(ScheduledPosts::Providers).json().not_null())
                    .col(ColumnDef::new(ScheduledPosts::MediaUrls).json().not_null())
                    .col(ColumnDef::new(ScheduledPosts::MediaType).string_len(16))
                    .col(
                        ColumnDef::new(ScheduledPosts::Status)
                            .string_len(32)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(ScheduledPosts::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScheduledPosts::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ScheduledPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_scheduled_posts_status_scheduled_at")
                    .table(ScheduledPosts::Table)
                    .col(ScheduledPosts::Status)
                    .col(ScheduledPosts::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialCredentials::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SocialCredentials::TeamId).uuid().not_null())
                    .col(
                        ColumnDef::new(SocialCredentials::Provider)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SocialCredentials::AccessToken)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SocialCredentials::RefreshToken).text())
                    .col(ColumnDef::new(SocialCredentials::ProviderUserId).string())
                    .col(ColumnDef::new(SocialCredentials::ProviderPageId).string())
                    .col(
                        ColumnDef::new(SocialCredentials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_social_credentials_team_provider")
                    .table(SocialCredentials::Table)
                    .col(SocialCredentials::TeamId)
                    .col(SocialCredentials::Provider)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::TeamId).uuid())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Success).boolean().not_null())
                    .col(ColumnDef::new(Notifications::Metadata).json().not_null())
                    .col(
                        ColumnDef::new(Notifications::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SocialCredentials::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ScheduledPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScheduledPosts {
    Table,
    Id,
    TeamId,
    UserId,
    Content,
    Providers,
    MediaUrls,
    MediaType,
    Status,
    ScheduledAt,
    PublishedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SocialCredentials {
    Table,
    Id,
    TeamId,
    Provider,
    AccessToken,
    RefreshToken,
    ProviderUserId,
    ProviderPageId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    TeamId,
    NotificationType,
    Title,
    Message,
    Success,
    Metadata,
    Read,
    CreatedAt,
}
