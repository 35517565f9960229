use glam::Vec3;
use rapier3d::control::{CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionLayer, LayerMask};
use crate::game::host::{EntityId, RayHit};

/// Handle to identify colliders
pub type ColliderHandle = rapier3d::prelude::ColliderHandle;

/// Capsule collider moved by the kinematic character controller
#[derive(Debug, Clone, Copy)]
struct CharacterShape {
    radius: f32,
    height: f32,
}

impl CharacterShape {
    /// Capsule whose total height (caps included) equals `height`
    fn shared_shape(&self) -> SharedShape {
        let half_segment = (self.height * 0.5 - self.radius).max(0.0);
        SharedShape::capsule_y(half_segment, self.radius)
    }
}

/// Physics world backing the reference host: static level colliders,
/// kinematic character capsules and ray queries.
pub struct PhysicsWorld {
    /// Gravity vector. Characters integrate their own gravity, this only
    /// affects dynamic bodies.
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and character sweeps
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Slide-and-step controller shared by all characters
    character_controller: KinematicCharacterController,

    /// Capsule dimensions of character colliders
    characters: HashMap<ColliderHandle, CharacterShape>,

    /// Game entity owning each collider
    collider_to_entity: HashMap<ColliderHandle, EntityId>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        let character_controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            ..KinematicCharacterController::default()
        };

        Self {
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            character_controller,
            characters: HashMap::new(),
            collider_to_entity: HashMap::new(),
        }
    }

    /// Step the simulation. Also refreshes the query pipeline so colliders
    /// moved since the last step are visible to sweeps and rays.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add an immovable box centred on `center`
    pub fn add_static_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        layer: CollisionLayer,
        entity: Option<EntityId>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(center))
            .collision_groups(layer.interaction_groups())
            .build();
        let handle = self.collider_set.insert(collider);
        if let Some(entity) = entity {
            self.collider_to_entity.insert(handle, entity);
        }
        handle
    }

    /// Add a character capsule whose centre sits at `position`
    pub fn add_character(
        &mut self,
        position: Vec3,
        radius: f32,
        height: f32,
        entity: EntityId,
    ) -> ColliderHandle {
        let shape = CharacterShape { radius, height };
        let collider = ColliderBuilder::new(shape.shared_shape())
            .translation(to_vector(position))
            .collision_groups(CollisionLayer::Player.interaction_groups())
            .build();
        let handle = self.collider_set.insert(collider);
        self.characters.insert(handle, shape);
        self.collider_to_entity.insert(handle, entity);
        handle
    }

    /// Sweep a character by `desired`, sliding along whatever it touches.
    /// Returns whether the character ended up on the ground.
    pub fn move_character(&mut self, handle: ColliderHandle, desired: Vec3) -> bool {
        let Some(collider) = self.collider_set.get(handle) else {
            return false;
        };

        let start = *collider.position();
        let movement = self.character_controller.move_shape(
            self.integration_parameters.dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            collider.shape(),
            &start,
            to_vector(desired),
            QueryFilter::default().exclude_collider(handle),
            |_| {},
        );

        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(start.translation.vector + movement.translation);
        }

        movement.grounded
    }

    /// Resize a character capsule, keeping its bottom in place
    pub fn set_character_height(&mut self, handle: ColliderHandle, height: f32) {
        let Some(shape) = self.characters.get_mut(&handle) else {
            return;
        };
        if shape.height == height {
            return;
        }
        let lift = (height - shape.height) * 0.5;
        shape.height = height;
        let shared = shape.shared_shape();

        if let Some(collider) = self.collider_set.get_mut(handle) {
            let translation = *collider.translation() + vector![0.0, lift, 0.0];
            collider.set_shape(shared);
            collider.set_translation(translation);
        }
    }

    /// Current height of a character capsule
    pub fn character_height(&self, handle: ColliderHandle) -> Option<f32> {
        self.characters.get(&handle).map(|shape| shape.height)
    }

    /// World-space centre of a collider
    pub fn collider_translation(&self, handle: ColliderHandle) -> Option<Vec3> {
        self.collider_set
            .get(handle)
            .map(|collider| to_vec3(collider.translation()))
    }

    /// Get the entity ID associated with a collider
    pub fn entity_of(&self, handle: ColliderHandle) -> Option<EntityId> {
        self.collider_to_entity.get(&handle).copied()
    }

    /// Cast a ray and return the nearest hit on a layer in `mask`
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
        exclude: Option<ColliderHandle>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        let ray = Ray::new(point![origin.x, origin.y, origin.z], to_vector(direction));

        let mut filter = QueryFilter::default().groups(mask.query_groups());
        if let Some(excluded) = exclude {
            filter = filter.exclude_collider(excluded);
        }

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(handle, distance)| RayHit {
                point: origin + direction * distance,
                distance,
                entity: self.entity_of(handle),
            })
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
