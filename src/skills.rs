use crate::layout::SkillNode;

pub struct Skill {
    pub node: SkillNode,
    pub label: &'static str,
    pub description: &'static str,
    pub tools: &'static [&'static str],
    pub projects: &'static [&'static str],
}

const RING: f64 = 180.0;

pub static SKILLS: [Skill; 6] = [
    Skill {
        node: SkillNode {
            id: "gameplay",
            angle: 0.0,
            distance: RING,
        },
        label: "Gameplay Systems",
        description: "Design and implementation of core game mechanics, player controllers, and interactive systems.",
        tools: &["C#", "Unity Input System", "Physics", "Animation"],
        projects: &["Car Dash 3D", "Hyper Rally 3D"],
    },
    Skill {
        node: SkillNode {
            id: "ai",
            angle: 60.0,
            distance: RING,
        },
        label: "AI & State Machines",
        description: "Intelligent enemy behavior, pathfinding, and finite state machine implementations.",
        tools: &["FSM", "Behavior Trees", "NavMesh", "A* Pathfinding"],
        projects: &["Zombie Game", "Hyper Rally 3D"],
    },
    Skill {
        node: SkillNode {
            id: "camera",
            angle: 120.0,
            distance: RING,
        },
        label: "Cinemachine & Cameras",
        description: "Dynamic camera systems, cinematic sequences, and smooth transitions.",
        tools: &["Cinemachine", "Timeline", "Virtual Cameras", "Dolly Tracks"],
        projects: &["Car Dash 3D", "Zombie Game"],
    },
    Skill {
        node: SkillNode {
            id: "systems",
            angle: 180.0,
            distance: RING,
        },
        label: "Game Systems",
        description: "Save systems, inventory management, progression, and game architecture.",
        tools: &["Addressables", "ScriptableObjects", "Dependency Injection", "Events"],
        projects: &["Ludo Rally", "Zombie Game"],
    },
    Skill {
        node: SkillNode {
            id: "mobile",
            angle: 240.0,
            distance: RING,
        },
        label: "Mobile Optimization",
        description: "Performance optimization, battery efficiency, and mobile-specific implementations.",
        tools: &["Object Pooling", "LOD", "Profiler", "Texture Compression"],
        projects: &["Car Dash 3D", "Ludo Rally"],
    },
    Skill {
        node: SkillNode {
            id: "unreal",
            angle: 300.0,
            distance: RING,
        },
        label: "Unreal Engine",
        description: "Currently expanding skills in Unreal Engine for AAA-quality projects.",
        tools: &["Blueprints", "C++", "Learning"],
        projects: &["Personal Projects"],
    },
];

pub fn nodes() -> Vec<SkillNode> {
    SKILLS.iter().map(|skill| skill.node).collect()
}

pub fn find(id: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.node.id == id)
}
