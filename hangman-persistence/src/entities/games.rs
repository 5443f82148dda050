use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub phrase_id: Uuid,
    pub visible_so_far: String,
    pub letters_guessed: String,
    pub mistakes_allowed: i32,
    pub mistakes_remaining: i32,
    pub game_over: bool,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::phrases::Entity",
        from = "Column::PhraseId",
        to = "super::phrases::Column::Id"
    )]
    Phrases,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::phrases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phrases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
