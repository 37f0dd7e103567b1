use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // hosts 表
        manager
            .create_table(
                Table::create()
                    .table(Host::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Host::HostId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    // 主机名不唯一：终止后的主机名可被新订单复用
                    .col(ColumnDef::new(Host::Domain).string().not_null())
                    .col(ColumnDef::new(Host::DedicatedIp).string().null())
                    .col(
                        ColumnDef::new(Host::DomainStatus)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(Host::Username).string().null())
                    .col(ColumnDef::new(Host::Password).string().null())
                    .col(ColumnDef::new(Host::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // nat_rules 表
        manager
            .create_table(
                Table::create()
                    .table(NatRule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NatRule::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NatRule::Hostname).string().not_null())
                    .col(ColumnDef::new(NatRule::Protocol).string().not_null())
                    .col(ColumnDef::new(NatRule::HostPort).integer().not_null())
                    .col(ColumnDef::new(NatRule::ContainerPort).integer().not_null())
                    .col(ColumnDef::new(NatRule::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 自然键 (hostname, protocol, host_port)，upsert 依赖此索引
        manager
            .create_index(
                Index::create()
                    .name("idx_nat_rules_natural_key")
                    .table(NatRule::Table)
                    .col(NatRule::Hostname)
                    .col(NatRule::Protocol)
                    .col(NatRule::HostPort)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NatRule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Host::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Host {
    #[sea_orm(iden = "hosts")]
    Table,
    HostId,
    Domain,
    DedicatedIp,
    DomainStatus,
    Username,
    Password,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NatRule {
    #[sea_orm(iden = "nat_rules")]
    Table,
    Id,
    Hostname,
    Protocol,
    HostPort,
    ContainerPort,
    CreatedAt,
}
