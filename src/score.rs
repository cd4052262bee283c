use bevy::prelude::*;

use crate::schedule::InGameSet;

pub fn plugin(app: &mut App) {
    app.insert_resource(Score::default()).add_systems(
        Update,
        render_score
            .run_if(resource_changed::<Score>)
            .in_set(InGameSet::Ui),
    );
}

/// Shapes destroyed since the last reset.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(pub u32);

impl Score {
    pub fn label(&self) -> String {
        format!("Score: {}", self.0)
    }
}

#[derive(Component)]
pub struct ScoreText;

pub fn render_score(score: Res<Score>, mut texts: Query<&mut Text, With<ScoreText>>) {
    for mut text in texts.iter_mut() {
        let label = score.label();
        match &mut text.sections[..] {
            [] => text.sections.push(TextSection::new(label, TextStyle::default())),
            [section, ..] => section.value = label,
        }
    }
}
